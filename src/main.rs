//! # Legislatie Proxy
//!
//! REST/JSON front for the legislatie.just.ro SOAP web service, built with
//! Rust, Axum and Tokio.
//!
//! ## Features
//! - `/search` with flexible query parameters mapped onto the SOAP search
//! - Cached upstream token, refreshed on expiry or after a SOAP Fault
//! - `/codes` listing of the principal Romanian codes
//! - Structured logging with tracing
//!
//! ## Architecture
//! The server is organized into modules:
//! - `server`: router, shared state and listener
//! - `config`: environment variable configuration
//! - `error`: failure taxonomy and its HTTP rendering
//! - `soap`: SOAP envelopes, XML parsing and the upstream client
//! - `legislation`: token cache, query translation, result mapping
//! - `routes`: HTTP route handlers
//!
//! ## Running the Server
//! ```bash
//! cargo run
//! ```
//!
//! The server listens on `http://0.0.0.0:5000` unless `SERVER_HOST` / `PORT`
//! say otherwise. Verify it with:
//! ```bash
//! curl http://localhost:5000/health
//! ```

mod config;
mod error;
mod legislation;
mod routes;
mod server;
mod soap;
mod state_structs;

#[cfg(test)]
mod test_support;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Application entry point.
///
/// Loads `.env` if present, initializes tracing, reads the configuration and
/// runs the server until the process is told to stop.
#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // RUST_LOG wins; otherwise info for this crate and the HTTP trace layer
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("legislatie_proxy=info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .compact(),
        )
        .init();

    tracing::info!("🏁 Starting Legislatie Proxy...");
    tracing::info!("📦 Package: {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    tracing::info!("🏗️  Build profile: {}", if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    });

    let config = match config::Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server::start(config).await {
        tracing::error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}
