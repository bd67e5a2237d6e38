//! # Blob Store
//!
//! Key/value access to named JSON documents, the sole persistence layer for
//! the testimonial service. The store is deliberately thin: whole-document
//! reads and writes, no locking, no compare-and-swap. Mutating callers are
//! expected to pair a [`Consistency::Strong`] read with the write that
//! follows it, which narrows (but does not close) the lost-update window.
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - [`ports`] - Port traits ([`BlobStore`], [`TimeSource`]) and the
//!   per-read [`Consistency`] mode
//! - [`adapters`] - Backends: [`MemoryBlobStore`] for tests and ephemeral
//!   deployments, [`FileBlobStore`] for durable single-node persistence
//!
//! ## Usage
//!
//! ```ignore
//! use vouch_store::{BlobStore, Consistency, FileBlobStore};
//!
//! let store = FileBlobStore::new("/var/lib/vouch");
//! store.set("pending", &serde_json::json!([])).await?;
//! let doc = store.get("pending", Consistency::Strong).await?;
//! ```

pub mod adapters;
pub mod error;
pub mod ports;

pub use adapters::file::FileBlobStore;
pub use adapters::memory::MemoryBlobStore;
pub use error::BlobStoreError;
pub use ports::{BlobStore, Consistency, ManualTimeSource, SystemTimeSource, TimeSource};
