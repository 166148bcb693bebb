//! Single-slot cache for the upstream token.
//!
//! The slot is refreshed lazily: a caller that finds it empty or expired
//! authenticates against the upstream and overwrites it. Concurrent misses
//! may both authenticate; the last write wins.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use parking_lot::RwLock;
use tracing::{debug, error, info};

use crate::error::ApiError;
use crate::legislation::Token;
use crate::soap::LegislationService;

/// A token handed out by the cache, and whether it came from the slot.
#[derive(Debug, Clone)]
pub struct TokenLease {
    pub token: Token,
    pub cached: bool,
}

pub struct TokenCache {
    upstream: Arc<dyn LegislationService>,
    clock: Arc<dyn Clock + Send + Sync>,
    ttl: TimeDelta,
    slot: RwLock<Option<Token>>,
}

impl TokenCache {
    pub fn new(
        upstream: Arc<dyn LegislationService>,
        clock: Arc<dyn Clock + Send + Sync>,
        ttl: Duration,
    ) -> Self {
        Self {
            upstream,
            clock,
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
            slot: RwLock::new(None),
        }
    }

    pub async fn get_token(&self) -> Result<Token, ApiError> {
        Ok(self.lease().await?.token)
    }

    /// Cached token if still valid, otherwise a fresh one from the upstream.
    pub async fn lease(&self) -> Result<TokenLease, ApiError> {
        if let Some(token) = self.current(self.clock.utc()) {
            debug!("using cached upstream token (expires {})", token.expires_at);
            return Ok(TokenLease { token, cached: true });
        }

        info!("requesting new upstream token");
        let value = self.upstream.authenticate().await.map_err(|e| {
            error!("upstream authentication failed: {}", e);
            e
        })?;

        let token = Token::new(value, self.clock.utc(), self.ttl);
        *self.slot.write() = Some(token.clone());
        info!("upstream token cached until {}", token.expires_at);

        Ok(TokenLease {
            token,
            cached: false,
        })
    }

    /// Drop the cached token so the next caller re-authenticates.
    pub fn invalidate(&self) {
        if self.slot.write().take().is_some() {
            info!("upstream token invalidated");
        }
    }

    fn current(&self, now: DateTime<Utc>) -> Option<Token> {
        self.slot
            .read()
            .as_ref()
            .filter(|token| !token.is_expired(now))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MutableClock, StubUpstream, fixed_now};

    fn cache_with(stub: Arc<StubUpstream>, clock: Arc<MutableClock>, ttl_secs: u64) -> TokenCache {
        TokenCache::new(stub, clock, Duration::from_secs(ttl_secs))
    }

    #[tokio::test]
    async fn test_first_call_authenticates_once() {
        let stub = Arc::new(StubUpstream::new());
        let clock = Arc::new(MutableClock::new(fixed_now()));
        let cache = cache_with(stub.clone(), clock.clone(), 3600);

        let call_time = clock.utc();
        let lease = cache.lease().await.unwrap();

        assert_eq!(stub.auth_calls(), 1);
        assert!(!lease.cached);
        assert_eq!(lease.token.value, "stub-token-1");
        assert!(lease.token.expires_at > call_time);
    }

    #[tokio::test]
    async fn test_valid_token_served_without_upstream_call() {
        let stub = Arc::new(StubUpstream::new());
        let clock = Arc::new(MutableClock::new(fixed_now()));
        let cache = cache_with(stub.clone(), clock.clone(), 3600);

        let first = cache.get_token().await.unwrap();
        clock.advance_seconds(3599);
        let lease = cache.lease().await.unwrap();

        assert_eq!(stub.auth_calls(), 1);
        assert!(lease.cached);
        assert_eq!(lease.token, first);
    }

    #[tokio::test]
    async fn test_expired_token_refreshed_exactly_once() {
        let stub = Arc::new(StubUpstream::new());
        let clock = Arc::new(MutableClock::new(fixed_now()));
        let cache = cache_with(stub.clone(), clock.clone(), 60);

        cache.get_token().await.unwrap();
        clock.advance_seconds(60);
        let call_time = clock.utc();
        let lease = cache.lease().await.unwrap();

        assert_eq!(stub.auth_calls(), 2);
        assert!(!lease.cached);
        assert_eq!(lease.token.value, "stub-token-2");
        assert!(lease.token.expires_at > call_time);
    }

    #[tokio::test]
    async fn test_auth_failure_propagates_and_leaves_slot_empty() {
        let stub = Arc::new(StubUpstream::new().failing_auth("bad credentials"));
        let clock = Arc::new(MutableClock::new(fixed_now()));
        let cache = cache_with(stub.clone(), clock, 3600);

        let err = cache.get_token().await.unwrap_err();
        assert!(matches!(err, ApiError::UpstreamAuth(_)));

        // Nothing cached, so the next call asks again instead of serving a stale value.
        assert!(cache.get_token().await.is_err());
        assert_eq!(stub.auth_calls(), 2);
    }

    #[tokio::test]
    async fn test_invalidate_forces_refresh() {
        let stub = Arc::new(StubUpstream::new());
        let clock = Arc::new(MutableClock::new(fixed_now()));
        let cache = cache_with(stub.clone(), clock, 3600);

        cache.get_token().await.unwrap();
        cache.invalidate();
        let lease = cache.lease().await.unwrap();

        assert!(!lease.cached);
        assert_eq!(stub.auth_calls(), 2);
    }
}
