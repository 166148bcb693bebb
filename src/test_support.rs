//! Shared test doubles: a scripted upstream and a settable clock.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use parking_lot::Mutex;

use crate::error::ApiError;
use crate::legislation::{RawRecord, SearchRequest};
use crate::soap::LegislationService;

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap()
}

pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance_seconds(&self, seconds: i64) {
        *self.0.lock() += TimeDelta::seconds(seconds);
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.0.lock()
    }
}

enum AuthScript {
    Succeed,
    Reject(String),
    Unreachable,
}

/// Upstream stand-in. Tokens are numbered per authentication call; searches
/// return the records registered for the requested title, or the default set.
pub struct StubUpstream {
    auth: AuthScript,
    default_records: Vec<RawRecord>,
    by_title: HashMap<String, Vec<RawRecord>>,
    faulting_titles: HashSet<String>,
    search_unreachable: bool,
    auth_calls: AtomicUsize,
    searches: Mutex<Vec<(SearchRequest, String)>>,
}

impl StubUpstream {
    pub fn new() -> Self {
        Self {
            auth: AuthScript::Succeed,
            default_records: Vec::new(),
            by_title: HashMap::new(),
            faulting_titles: HashSet::new(),
            search_unreachable: false,
            auth_calls: AtomicUsize::new(0),
            searches: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_auth(mut self, message: &str) -> Self {
        self.auth = AuthScript::Reject(message.to_string());
        self
    }

    pub fn unreachable(mut self) -> Self {
        self.auth = AuthScript::Unreachable;
        self.search_unreachable = true;
        self
    }

    pub fn with_records(mut self, records: Vec<RawRecord>) -> Self {
        self.default_records = records;
        self
    }

    pub fn with_title(mut self, title: &str, records: Vec<RawRecord>) -> Self {
        self.by_title.insert(title.to_string(), records);
        self
    }

    pub fn faulting_on(mut self, title: &str) -> Self {
        self.faulting_titles.insert(title.to_string());
        self
    }

    pub fn auth_calls(&self) -> usize {
        self.auth_calls.load(Ordering::SeqCst)
    }

    pub fn searches(&self) -> Vec<(SearchRequest, String)> {
        self.searches.lock().clone()
    }
}

#[async_trait]
impl LegislationService for StubUpstream {
    async fn authenticate(&self) -> Result<String, ApiError> {
        let n = self.auth_calls.fetch_add(1, Ordering::SeqCst) + 1;
        match &self.auth {
            AuthScript::Succeed => Ok(format!("stub-token-{n}")),
            AuthScript::Reject(message) => Err(ApiError::UpstreamAuth(message.clone())),
            AuthScript::Unreachable => {
                Err(ApiError::UpstreamUnavailable("connection refused".into()))
            }
        }
    }

    async fn search(
        &self,
        request: &SearchRequest,
        token: &str,
    ) -> Result<Vec<RawRecord>, ApiError> {
        self.searches.lock().push((request.clone(), token.to_string()));
        if self.search_unreachable {
            return Err(ApiError::UpstreamUnavailable("connection refused".into()));
        }

        let title = request.title.as_deref().unwrap_or_default();
        if self.faulting_titles.contains(title) {
            return Err(ApiError::UpstreamFault {
                code: "s:Server".into(),
                message: format!("no index for {title}"),
            });
        }

        let records = self.by_title.get(title).unwrap_or(&self.default_records);
        Ok(records.iter().take(request.per_page as usize).cloned().collect())
    }
}

/// A well-formed upstream act with the given id and title.
pub fn law(id: u32, title: &str) -> RawRecord {
    RawRecord::from_iter([
        ("Id", id.to_string()),
        ("Titlu", title.to_string()),
        ("Numar", "287".to_string()),
        ("An", "2009".to_string()),
        ("TipAct", "LEGE".to_string()),
        ("Emitent", "PARLAMENTUL".to_string()),
        ("DataVigoare", "2011-10-01T00:00:00".to_string()),
        ("Publicatie", "MONITORUL OFICIAL nr. 511".to_string()),
        ("Text", format!("Textul actului {id}")),
    ])
}
