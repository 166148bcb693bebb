use std::collections::BTreeMap;

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

/// Upstream credential together with the moment it stops being trusted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub value: String,
    pub obtained_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Token {
    pub fn new(value: String, obtained_at: DateTime<Utc>, ttl: TimeDelta) -> Self {
        let expires_at = obtained_at
            .checked_add_signed(ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self {
            value,
            obtained_at,
            expires_at,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Search as the upstream understands it. `None` filters are left out of the envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub title: Option<String>,
    pub year: Option<i32>,
    pub number: Option<String>,
    pub text: Option<String>,
    pub page: u32,
    pub per_page: u32,
}

/// One upstream record: element local names mapped to their text content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    fields: BTreeMap<String, String>,
}

impl RawRecord {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RawRecord
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Principal code as returned by the adapter, before mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCodeEntry {
    pub code_name: String,
    pub record: RawRecord,
}

/// Public shape of a legislative act.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LawRecord {
    pub id: String,
    pub title: String,
    pub number: String,
    pub year: Option<i32>,
    #[serde(rename = "type")]
    pub act_type: String,
    pub issuer: String,
    pub effective_date: String,
    pub publication: String,
    pub text_preview: String,
    pub text_full: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeEntry {
    pub code_name: String,
    pub details: LawRecord,
}
