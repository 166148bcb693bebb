use axum::{extract::State, response::Json};

use crate::error::ApiError;
use crate::server::AppState;
use crate::state_structs::TokenResponse;

/// `GET /token`: the current upstream token, fetching one when the cache is cold.
pub async fn get_token(State(state): State<AppState>) -> Result<Json<TokenResponse>, ApiError> {
    let lease = state.tokens.lease().await?;

    Ok(Json(TokenResponse {
        success: true,
        token: lease.token.value,
        cached: lease.cached,
        obtained_at: lease.token.obtained_at,
        expires_at: lease.token.expires_at,
    }))
}
