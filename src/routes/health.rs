use axum::{extract::State, response::Json};
use mockable::Clock;
use serde_json::{Value, json};

use crate::legislation::catalog::PRINCIPAL_CODES;
use crate::server::AppState;
use crate::state_structs::HealthResponse;

pub const SERVICE_NAME: &str = "Legislatie.just.ro API Proxy";

/// Health check endpoint handler.
///
/// Reports process liveness only; the upstream SOAP service is never
/// contacted, so this answers `200 OK` even while the upstream is down.
///
/// # Route
/// - **Method**: GET
/// - **Path**: `/health`
///
/// # Response Format
/// ```json
/// { "status": "ok", "service": "...", "version": "0.1.0", "timestamp": "..." }
/// ```
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        timestamp: state.clock.utc(),
    })
}

/// Self-describing index served at `/`.
pub async fn index() -> Json<Value> {
    let codes: Vec<Value> = PRINCIPAL_CODES
        .iter()
        .map(|code| json!({ "name": code.name, "year": code.year, "number": code.number }))
        .collect();

    Json(json!({
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "/health": "GET - service liveness, no upstream call",
            "/token": "GET - upstream token (cached)",
            "/search": "GET - search the legislation",
            "/codes": "GET - principal Romanian codes",
            "/document/{id}": "GET - canonical portal URL for a document",
        },
        "search_params": {
            "title": "act title (e.g. Codul civil)",
            "year": "year as an integer (e.g. 2009)",
            "number": "act number (e.g. 287)",
            "text": "free text",
            "page": "page index, default 0, negative values become 0",
            "per_page": "results per page, default 10, clamped to 1..=100",
        },
        "examples": {
            "search_civil_code": "/search?title=Codul civil",
            "search_by_year": "/search?year=2009&per_page=20",
            "search_penal": "/search?title=Codul penal&page=0",
        },
        "codes": codes,
    }))
}
