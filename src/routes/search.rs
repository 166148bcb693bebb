use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::Json;
use tracing::{error, info};

use crate::error::ApiError;
use crate::legislation::mapper::map_law;
use crate::legislation::query::{QueryEcho, SearchParams, translate};
use crate::server::AppState;
use crate::state_structs::SearchResponse;

/// `GET /search`: translate the query, run it upstream, map the records.
///
/// A SOAP Fault drops the cached token so the next request authenticates
/// again; this request still fails.
pub async fn search(
    State(state): State<AppState>,
    query: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Query(params) = query.map_err(|e| ApiError::MalformedQuery(e.body_text()))?;
    let request = translate(&params)?;
    info!(
        "search title={:?} year={:?} number={:?} page={} per_page={}",
        request.title, request.year, request.number, request.page, request.per_page
    );

    let token = state.tokens.get_token().await?;
    let raw = match state.upstream.search(&request, &token.value).await {
        Ok(raw) => raw,
        Err(e) => {
            error!("upstream search failed: {}", e);
            if matches!(e, ApiError::UpstreamFault { .. }) {
                state.tokens.invalidate();
            }
            return Err(e);
        }
    };

    let results = raw.iter().map(map_law).collect::<Result<Vec<_>, _>>()?;

    Ok(Json(SearchResponse {
        success: true,
        total: results.len(),
        page: request.page,
        per_page: request.per_page,
        query: QueryEcho::from(&request),
        results,
    }))
}
