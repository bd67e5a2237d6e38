//! Store-level errors.

/// Failures raised by a blob store backend.
///
/// Shape-level problems (a document that parses but is not the expected
/// type) are not detected here; the store hands back whatever JSON is at
/// rest, and callers decide what counts as corruption.
#[derive(Debug, thiserror::Error)]
pub enum BlobStoreError {
    /// I/O failure reading or writing the backing medium.
    #[error("store I/O failure: {0}")]
    Io(#[from] std::io::Error),

    /// A stored document could not be parsed as JSON at all.
    #[error("stored document is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The key cannot be mapped onto the backend (empty, or containing
    /// a path-escaping segment).
    #[error("invalid store key: {0}")]
    InvalidKey(String),
}
