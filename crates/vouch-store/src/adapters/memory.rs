//! In-memory blob store for unit tests and ephemeral deployments.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;

use crate::error::BlobStoreError;
use crate::ports::{BlobStore, Consistency};

/// HashMap-backed store. A single process sees its own writes immediately,
/// so both consistency modes read the same map.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    data: RwLock<HashMap<String, Value>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents held. Test helper.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn get(
        &self,
        key: &str,
        _consistency: Consistency,
    ) -> Result<Option<Value>, BlobStoreError> {
        Ok(self.data.read().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &Value) -> Result<(), BlobStoreError> {
        self.data.write().insert(key.to_string(), value.clone());
        Ok(())
    }
}
