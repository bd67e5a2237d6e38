//! File-backed blob store: one JSON file per key beneath a data directory.
//!
//! Layout mirrors the key space: `pending` lands at `<root>/pending.json`,
//! `ratelimit/203.0.113.7` at `<root>/ratelimit/203.0.113.7.json`. Writes
//! go through a temp file and an atomic rename, so a reader never observes
//! a half-written document; concurrent writers to the same key resolve to
//! last-rename-wins, which matches the store's lost-update contract.
//!
//! Strong reads always hit the filesystem and refresh an in-process cache;
//! eventual reads serve the cached copy when present, which may be stale if
//! another process shares the directory. The cache lock is only held for
//! map access, never across file I/O.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use tokio::io::AsyncWriteExt;

use crate::error::BlobStoreError;
use crate::ports::{BlobStore, Consistency};

pub struct FileBlobStore {
    root: PathBuf,
    cache: RwLock<HashMap<String, Value>>,
}

impl FileBlobStore {
    /// Create a store rooted at `root`. The directory is created lazily on
    /// first write.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Map a key onto its backing file, refusing anything that could
    /// escape the data directory.
    fn path_for(&self, key: &str) -> Result<PathBuf, BlobStoreError> {
        if key.is_empty() {
            return Err(BlobStoreError::InvalidKey(key.to_string()));
        }
        let mut path = self.root.clone();
        let mut segments = key.split('/').peekable();
        while let Some(segment) = segments.next() {
            if segment.is_empty()
                || segment == "."
                || segment == ".."
                || segment.contains(['\\', '\0'])
            {
                return Err(BlobStoreError::InvalidKey(key.to_string()));
            }
            if segments.peek().is_some() {
                path.push(segment);
            } else {
                path.push(format!("{segment}.json"));
            }
        }
        Ok(path)
    }

    /// Read the document from disk and refresh the cache.
    async fn read_from_disk(&self, key: &str) -> Result<Option<Value>, BlobStoreError> {
        let path = self.path_for(key)?;
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(key, "no document on disk");
                self.cache.write().remove(key);
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        let value: Value = serde_json::from_slice(&bytes)?;
        self.cache.write().insert(key.to_string(), value.clone());
        Ok(Some(value))
    }
}

#[async_trait]
impl BlobStore for FileBlobStore {
    async fn get(
        &self,
        key: &str,
        consistency: Consistency,
    ) -> Result<Option<Value>, BlobStoreError> {
        if consistency == Consistency::Eventual {
            if let Some(cached) = self.cache.read().get(key).cloned() {
                return Ok(Some(cached));
            }
        }
        self.read_from_disk(key).await
    }

    async fn set(&self, key: &str, value: &Value) -> Result<(), BlobStoreError> {
        let path = self.path_for(key)?;
        let bytes = serde_json::to_vec(value)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        // Write-then-rename keeps the document atomic on the reader side.
        let tmp_path = path.with_extension("json.tmp");
        let mut file = tokio::fs::File::create(&tmp_path).await?;
        file.write_all(&bytes).await?;
        file.sync_all().await?;
        drop(file);
        tokio::fs::rename(&tmp_path, &path).await?;
        tracing::debug!(key, bytes = bytes.len(), "document written");

        self.cache.write().insert(key.to_string(), value.clone());
        Ok(())
    }
}
