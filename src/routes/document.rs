use axum::extract::Path;
use axum::response::Json;

use crate::legislation::mapper::document_url;
use crate::state_structs::DocumentResponse;

/// `GET /document/{id}`: canonical portal URL; no upstream call.
pub async fn get_document(Path(id): Path<String>) -> Json<DocumentResponse> {
    Json(DocumentResponse {
        success: true,
        url: document_url(&id),
        id,
    })
}
