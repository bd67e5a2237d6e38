//! # Ports
//!
//! Driven-port traits the rest of the system depends on. Production and
//! test adapters live in [`crate::adapters`]; the gateway only ever sees
//! these traits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::BlobStoreError;

/// Consistency mode for a single read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Consistency {
    /// Reflects the latest completed write. Used everywhere state is
    /// mutated, so the read-modify-write cycle starts from current data.
    Strong,
    /// May return a stale prior value in exchange for a cheaper read.
    /// Used on the high-traffic public display path.
    Eventual,
}

/// Abstract interface for the JSON blob namespace.
///
/// Keys are flat strings; `/` separates logical segments
/// (`ratelimit/203.0.113.7`). Writes replace the whole document; there is
/// no partial or field-level update.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Get a document by key, `None` when absent.
    async fn get(&self, key: &str, consistency: Consistency)
        -> Result<Option<Value>, BlobStoreError>;

    /// Replace the document at `key`.
    async fn set(&self, key: &str, value: &Value) -> Result<(), BlobStoreError>;
}

/// Abstract interface for time operations (for testability).
pub trait TimeSource: Send + Sync {
    /// Current wall-clock time.
    fn now_utc(&self) -> DateTime<Utc>;

    /// Current time as epoch milliseconds, the unit the rate-limit window
    /// is persisted in.
    fn now_millis(&self) -> i64 {
        self.now_utc().timestamp_millis()
    }
}

/// Default time source using the system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually advanced time source for deterministic tests (window rollover,
/// timestamp assertions).
#[derive(Debug)]
pub struct ManualTimeSource {
    now: parking_lot::Mutex<DateTime<Utc>>,
}

impl ManualTimeSource {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: parking_lot::Mutex::new(start),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock() = now;
    }

    /// Move the clock forward.
    pub fn advance(&self, delta: chrono::Duration) {
        let mut now = self.now.lock();
        *now += delta;
    }
}

impl TimeSource for ManualTimeSource {
    fn now_utc(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}
