//! Store-backed submission rate limiting.
//!
//! One fixed window per submitter IP, persisted at `ratelimit/<ip>` in the
//! same namespace as the data it guards, so the count survives restarts
//! and applies across replicas sharing a store. The window rolls over
//! lazily on the first check after expiry; there is no background sweep.
//!
//! The read-increment-write is not atomic against concurrent requests from
//! the same IP: racing submitters can overshoot the limit by the degree of
//! concurrency. No write happens on rejection, so the overshoot is bounded
//! and the window never extends itself.

use std::net::IpAddr;
use std::sync::Arc;

use crate::domain::config::RateLimitConfig;
use crate::domain::error::{ApiError, ApiResult};
use vouch_store::{BlobStore, Consistency, TimeSource};
use vouch_types::RateLimitState;

pub struct SubmissionRateLimiter {
    store: Arc<dyn BlobStore>,
    clock: Arc<dyn TimeSource>,
    config: RateLimitConfig,
}

impl SubmissionRateLimiter {
    pub fn new(
        store: Arc<dyn BlobStore>,
        clock: Arc<dyn TimeSource>,
        config: RateLimitConfig,
    ) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    /// Admit the submission and record it, or fail with `RateLimited`.
    ///
    /// An unidentifiable submitter (`None`) is always admitted; there is
    /// nothing to key the window on.
    pub async fn check_and_increment(&self, ip: Option<IpAddr>) -> ApiResult<()> {
        let Some(ip) = ip else {
            return Ok(());
        };
        let key = format!("ratelimit/{ip}");
        let now = self.clock.now_millis();
        let window_ms = self.config.window_secs as i64 * 1000;

        // Malformed state is re-initialized rather than treated as
        // corruption: the counter guards nothing durable.
        let mut state = self
            .store
            .get(&key, Consistency::Strong)
            .await?
            .and_then(|v| serde_json::from_value::<RateLimitState>(v).ok())
            .unwrap_or_else(|| RateLimitState::fresh(now + window_ms));

        if now > state.reset_at {
            state = RateLimitState::fresh(now + window_ms);
        }

        if state.count >= self.config.max_per_window {
            tracing::warn!(ip = %ip, count = state.count, "submission rate limit exceeded");
            return Err(ApiError::RateLimited);
        }

        state.count += 1;
        self.store.set(&key, &serde_json::to_value(state)?).await?;
        Ok(())
    }
}
