//! # Error Module
//!
//! Failure taxonomy shared by every layer of the proxy. Lower layers return
//! `ApiError`; only the HTTP layer turns it into a status code and the
//! `{success: false, error}` envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// A client-supplied query parameter could not be used.
    #[error("invalid value for parameter `{field}`: {reason}")]
    InvalidParameter { field: &'static str, reason: String },

    /// The query string itself could not be read (bad encoding, repeated keys).
    #[error("invalid query string: {0}")]
    MalformedQuery(String),

    /// The upstream refused or failed to issue a token.
    #[error("upstream authentication failed: {0}")]
    UpstreamAuth(String),

    /// Network or transport failure, including timeouts.
    #[error("upstream service unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The upstream answered with something we cannot read.
    #[error("unexpected upstream response: {0}")]
    UpstreamResponse(String),

    /// The upstream answered with a SOAP Fault.
    #[error("SOAP fault: {message}")]
    UpstreamFault { code: String, message: String },

    /// A record parsed fine but lacks a field we cannot do without.
    #[error("malformed upstream data: missing field `{0}`")]
    MalformedUpstreamData(&'static str),
}

impl ApiError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidParameter { .. } | Self::MalformedQuery(_) => StatusCode::BAD_REQUEST,
            Self::UpstreamAuth(_)
            | Self::UpstreamUnavailable(_)
            | Self::UpstreamResponse(_)
            | Self::UpstreamFault { .. }
            | Self::MalformedUpstreamData(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::UpstreamUnavailable(format!("request timed out: {err}"))
        } else if err.is_decode() || err.is_body() {
            Self::UpstreamResponse(err.to_string())
        } else {
            Self::UpstreamUnavailable(err.to_string())
        }
    }
}

impl From<quick_xml::Error> for ApiError {
    fn from(err: quick_xml::Error) -> Self {
        Self::UpstreamResponse(format!("invalid XML: {err}"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            Self::UpstreamFault { code, message } => json!({
                "success": false,
                "error": self.to_string(),
                "detail": { "faultcode": code, "faultstring": message },
            }),
            _ => json!({ "success": false, "error": self.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}
