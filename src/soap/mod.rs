//! # SOAP Module
//!
//! Everything that knows the upstream speaks SOAP lives here: envelope
//! construction, XML response parsing and the HTTP transport. The rest of
//! the crate only sees the [`LegislationService`] trait.

pub mod client;
pub mod envelope;
pub mod parser;

use async_trait::async_trait;
use tracing::warn;

use crate::error::ApiError;
use crate::legislation::catalog::PRINCIPAL_CODES;
use crate::legislation::{RawCodeEntry, RawRecord, SearchRequest};

pub use client::SoapClient;

/// Narrow interface to the upstream legislation service.
#[async_trait]
pub trait LegislationService: Send + Sync {
    /// Obtain a fresh opaque token.
    async fn authenticate(&self) -> Result<String, ApiError>;

    /// Run one search and return the records of the requested page.
    async fn search(
        &self,
        request: &SearchRequest,
        token: &str,
    ) -> Result<Vec<RawRecord>, ApiError>;

    /// Look up every principal code, keeping the first hit of each.
    ///
    /// A code the upstream faults on or does not find is skipped; transport
    /// and parse failures abort the listing. When nothing resolved and at
    /// least one lookup faulted, the first fault is returned instead of an
    /// empty listing, since that is what a rejected token looks like.
    async fn list_codes(&self, token: &str) -> Result<Vec<RawCodeEntry>, ApiError> {
        let mut entries = Vec::with_capacity(PRINCIPAL_CODES.len());
        let mut first_fault = None;

        for code in PRINCIPAL_CODES {
            match self.search(&code.lookup_request(), token).await {
                Ok(records) => match records.into_iter().next() {
                    Some(record) => entries.push(RawCodeEntry {
                        code_name: code.name.to_string(),
                        record,
                    }),
                    None => warn!("code {} not found upstream", code.name),
                },
                Err(e @ ApiError::UpstreamFault { .. }) => {
                    warn!("code {} lookup failed: {}", code.name, e);
                    first_fault.get_or_insert(e);
                }
                Err(e) => return Err(e),
            }
        }

        if let Some(fault) = first_fault.filter(|_| entries.is_empty()) {
            return Err(fault);
        }

        Ok(entries)
    }
}
