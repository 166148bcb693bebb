use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, error};

use crate::config::UpstreamConfig;
use crate::error::ApiError;
use crate::legislation::{RawRecord, SearchRequest};
use crate::soap::{LegislationService, envelope, parser};

/// reqwest-backed client for the legislation SOAP endpoint.
pub struct SoapClient {
    client: Client,
    config: UpstreamConfig,
}

impl SoapClient {
    pub fn new(config: UpstreamConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /// POST one envelope and return the response body.
    ///
    /// Non-2xx answers become the Fault they carry, or `UpstreamResponse`
    /// when the body holds no Fault.
    async fn call(&self, operation: &str, envelope: String) -> Result<String, ApiError> {
        let action = format!("\"{}{}\"", self.config.action_base, operation);
        debug!("calling upstream {} at {}", operation, self.config.endpoint);

        let response = self
            .client
            .post(&self.config.endpoint)
            .header(CONTENT_TYPE, "text/xml; charset=utf-8")
            .header("SOAPAction", action)
            .body(envelope)
            .send()
            .await
            .map_err(|e| {
                error!("upstream {} request failed: {}", operation, e);
                ApiError::from(e)
            })?;

        let status = response.status();
        let body = response.text().await?;
        debug!("upstream {} answered HTTP {} ({} bytes)", operation, status, body.len());

        if !status.is_success() {
            if let Some(fault) = parser::parse_fault(&body) {
                return Err(fault);
            }
            return Err(ApiError::UpstreamResponse(format!(
                "{operation} returned HTTP {status}"
            )));
        }
        Ok(body)
    }
}

#[async_trait]
impl LegislationService for SoapClient {
    async fn authenticate(&self) -> Result<String, ApiError> {
        let body = self
            .call("GetToken", envelope::get_token(&self.config.service_ns))
            .await
            .map_err(|e| match e {
                ApiError::UpstreamFault { message, .. } => ApiError::UpstreamAuth(message),
                other => other,
            })?;
        parser::parse_token(&body)
    }

    async fn search(
        &self,
        request: &SearchRequest,
        token: &str,
    ) -> Result<Vec<RawRecord>, ApiError> {
        let envelope =
            envelope::search(&self.config.service_ns, &self.config.model_ns, request, token);
        let body = self.call("Search", envelope).await?;
        parser::parse_search(&body)
    }
}
