//! # Server Module
//!
//! HTTP server setup and route configuration for the legislation proxy.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use mockable::{Clock, DefaultClock};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::legislation::TokenCache;
use crate::routes;
use crate::soap::{LegislationService, SoapClient};

/// Application state shared across all route handlers
#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<TokenCache>,
    pub upstream: Arc<dyn LegislationService>,
    pub clock: Arc<dyn Clock + Send + Sync>,
}

impl AppState {
    /// Wire the real SOAP client, the system clock and a cold token cache.
    pub fn from_config(config: &Config) -> Result<Self> {
        let soap = SoapClient::new(config.upstream.clone()).context("Failed to build HTTP client")?;
        let upstream: Arc<dyn LegislationService> = Arc::new(soap);
        let clock: Arc<dyn Clock + Send + Sync> = Arc::new(DefaultClock);
        let tokens = Arc::new(TokenCache::new(upstream.clone(), clock.clone(), config.token_ttl));

        Ok(Self {
            tokens,
            upstream,
            clock,
        })
    }
}

/// Build the router with CORS and request tracing layers.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::create_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                // Automation tools and browser clients call from arbitrary origins.
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Starts the proxy HTTP server and serves until Ctrl-C or SIGTERM.
pub async fn start(config: Config) -> Result<()> {
    let state = AppState::from_config(&config)?;
    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| {
            format!(
                "Invalid listen address {}:{}",
                config.server.host, config.server.port
            )
        })?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr} - port may already be in use"))?;

    tracing::info!("📡 Listening on http://{}", addr);
    tracing::info!("🏥 Health check available at http://{}/health", addr);
    tracing::info!("🔗 Upstream SOAP endpoint: {}", config.upstream.endpoint);
    tracing::info!("🔑 Token lifetime: {}s", config.token_ttl.as_secs());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("👋 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
