// # Routes Module
//
// - HTTP handlers for the legislation proxy, one file per endpoint group.
// - Handlers return `Result<Json<_>, ApiError>`; `ApiError` picks the status
//   and renders the `{success: false, error}` envelope.
//
// ## Available Route Modules
// - `health`: liveness and the documentation index
// - `token`: cached upstream token
// - `search`: legislation search
// - `codes`: principal codes
// - `document`: canonical document URLs

use axum::{Router, routing::get};

use crate::server::AppState;

/// Liveness and documentation endpoints
pub mod health;

/// Upstream token endpoint
pub mod token;

/// Legislation search endpoint
pub mod search;

/// Principal codes endpoint
pub mod codes;

/// Document URL endpoint
pub mod document;

/// Create the proxy routes
pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(health::index))
        .route("/health", get(health::health))
        .route("/token", get(token::get_token))
        .route("/search", get(search::search))
        .route("/codes", get(codes::list_codes))
        .route("/document/{id}", get(document::get_document))
}
