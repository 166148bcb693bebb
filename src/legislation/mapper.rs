//! Reshapes upstream records into the public JSON records.

use chrono::{DateTime, NaiveDateTime};

use crate::error::ApiError;
use crate::legislation::{CodeEntry, LawRecord, RawCodeEntry, RawRecord};

pub const DETAIL_URL_BASE: &str = "https://legislatie.just.ro/Public/DetaliiDocument/";
pub const PREVIEW_CHARS: usize = 500;

/// Canonical portal page for a document id.
pub fn document_url(id: &str) -> String {
    format!("{DETAIL_URL_BASE}{id}")
}

/// Map one upstream act. Only `Id` is required; every other field falls back to empty.
pub fn map_law(raw: &RawRecord) -> Result<LawRecord, ApiError> {
    let id = raw
        .get("Id")
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or(ApiError::MalformedUpstreamData("Id"))?;

    let text_full = field(raw, "Text");

    Ok(LawRecord {
        id: id.to_string(),
        title: field(raw, "Titlu"),
        number: field(raw, "Numar"),
        year: raw.get("An").and_then(|an| an.trim().parse().ok()),
        act_type: field(raw, "TipAct"),
        issuer: field(raw, "Emitent"),
        effective_date: raw.get("DataVigoare").map(normalize_date).unwrap_or_default(),
        publication: field(raw, "Publicatie"),
        text_preview: text_full.chars().take(PREVIEW_CHARS).collect(),
        url: document_url(id),
        text_full,
    })
}

pub fn map_code(raw: &RawCodeEntry) -> Result<CodeEntry, ApiError> {
    Ok(CodeEntry {
        code_name: raw.code_name.clone(),
        details: map_law(&raw.record)?,
    })
}

fn field(raw: &RawRecord, name: &str) -> String {
    raw.get(name).unwrap_or_default().to_string()
}

// xsd:dateTime values carry a meaningless midnight time; keep the date only.
fn normalize_date(value: &str) -> String {
    let value = value.trim();
    if let Ok(naive) = value.parse::<NaiveDateTime>() {
        return naive.date().format("%Y-%m-%d").to_string();
    }
    if let Ok(dated) = DateTime::parse_from_rfc3339(value) {
        return dated.date_naive().format("%Y-%m-%d").to_string();
    }
    value.to_string()
}
