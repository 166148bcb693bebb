use axum::{extract::State, response::Json};
use tracing::{error, info};

use crate::error::ApiError;
use crate::legislation::mapper::map_code;
use crate::server::AppState;
use crate::state_structs::CodesResponse;

/// `GET /codes`: the principal codes the upstream could find.
///
/// A SOAP Fault drops the cached token, as for `/search`.
pub async fn list_codes(State(state): State<AppState>) -> Result<Json<CodesResponse>, ApiError> {
    let token = state.tokens.get_token().await?;
    let raw = state.upstream.list_codes(&token.value).await.map_err(|e| {
        error!("listing codes failed: {}", e);
        if matches!(e, ApiError::UpstreamFault { .. }) {
            state.tokens.invalidate();
        }
        e
    })?;

    let codes = raw.iter().map(map_code).collect::<Result<Vec<_>, _>>()?;
    info!("resolved {} principal codes", codes.len());

    Ok(Json(CodesResponse {
        success: true,
        total: codes.len(),
        codes,
    }))
}
