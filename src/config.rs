//! Configuration module for environment variables and application settings

use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};

pub const DEFAULT_SOAP_URL: &str = "http://legislatie.just.ro/apiws/FreeWebService.svc";
pub const DEFAULT_SOAP_ACTION_BASE: &str = "http://tempuri.org/IFreeWebService/";
pub const DEFAULT_SERVICE_NS: &str = "http://tempuri.org/";
pub const DEFAULT_MODEL_NS: &str = "http://schemas.datacontract.org/2004/07/FreeWebService";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,

    /// Upstream SOAP service configuration
    pub upstream: UpstreamConfig,

    /// Assumed lifetime of an upstream token
    pub token_ttl: Duration,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// SOAP endpoint the envelopes are posted to
    pub endpoint: String,
    /// Prefix of the SOAPAction header; the operation name is appended
    pub action_base: String,
    /// Namespace of the operation elements (`GetToken`, `Search`)
    pub service_ns: String,
    /// Namespace of the `SearchModel` members
    pub model_ns: String,
    /// Ceiling for a single outbound call
    pub timeout: Duration,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_SOAP_URL.to_string(),
            action_base: DEFAULT_SOAP_ACTION_BASE.to_string(),
            service_ns: DEFAULT_SERVICE_NS.to_string(),
            model_ns: DEFAULT_MODEL_NS.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token_ttl_secs: u64 = parse_or(&lookup, "TOKEN_TTL_SECS", 3600)?;
        if token_ttl_secs == 0 {
            bail!("TOKEN_TTL_SECS must be at least 1");
        }

        let timeout_secs: u64 = parse_or(&lookup, "UPSTREAM_TIMEOUT_SECS", 30)?;
        if !(1..=300).contains(&timeout_secs) {
            bail!("UPSTREAM_TIMEOUT_SECS must be between 1 and 300, got {timeout_secs}");
        }

        let endpoint =
            lookup("LEGISLATIE_SOAP_URL").unwrap_or_else(|| DEFAULT_SOAP_URL.to_string());
        let parsed = url::Url::parse(&endpoint)
            .with_context(|| format!("LEGISLATIE_SOAP_URL is not a valid URL: {endpoint}"))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(anyhow!(
                "LEGISLATIE_SOAP_URL must use http or https, got {}",
                parsed.scheme()
            ));
        }

        Ok(Self {
            server: ServerConfig {
                host: lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: parse_or(&lookup, "PORT", 5000)?,
            },
            upstream: UpstreamConfig {
                endpoint,
                action_base: lookup("LEGISLATIE_SOAP_ACTION_BASE")
                    .unwrap_or_else(|| DEFAULT_SOAP_ACTION_BASE.to_string()),
                service_ns: lookup("LEGISLATIE_SERVICE_NS")
                    .unwrap_or_else(|| DEFAULT_SERVICE_NS.to_string()),
                model_ns: lookup("LEGISLATIE_MODEL_NS")
                    .unwrap_or_else(|| DEFAULT_MODEL_NS.to_string()),
                timeout: Duration::from_secs(timeout_secs),
            },
            token_ttl: Duration::from_secs(token_ttl_secs),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw}")),
        None => Ok(default),
    }
}
