// --- JSON envelopes returned by the HTTP layer ---
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::legislation::query::QueryEcho;
use crate::legislation::{CodeEntry, LawRecord};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub success: bool,
    pub token: String,
    pub cached: bool,
    pub obtained_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub total: usize,
    pub page: u32,
    pub per_page: u32,
    pub query: QueryEcho,
    pub results: Vec<LawRecord>,
}

#[derive(Debug, Serialize)]
pub struct CodesResponse {
    pub success: bool,
    pub total: usize,
    pub codes: Vec<CodeEntry>,
}

#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    pub success: bool,
    pub id: String,
    pub url: String,
}
