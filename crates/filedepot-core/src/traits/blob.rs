//! Blob store trait for pluggable key-addressed object storage backends.

use std::collections::HashMap;

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Side-channel string metadata attached to a stored object.
pub type BlobMetadata = HashMap<String, String>;

/// A single entry returned by a full enumeration: the object key plus its
/// metadata. Content is deliberately absent — enumeration is cheap, a
/// content read is a separate [`BlobStore::get`] call.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BlobObject {
    /// Key the object is stored under.
    pub key: String,
    /// Metadata attached at write time.
    pub metadata: BlobMetadata,
}

/// Trait for key-addressed binary object storage with per-object string
/// metadata.
///
/// Implementations exist for the local filesystem and an in-memory map.
/// The trait is defined here in `filedepot-core` and implemented in
/// `filedepot-storage`. Implementations must be safe for concurrent use;
/// no isolation is guaranteed between an enumeration and a concurrent put.
#[async_trait]
pub trait BlobStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the store type name (e.g., "local", "memory").
    fn store_type(&self) -> &str;

    /// Check whether the store is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Write an object under `key` with the given metadata. Overwrites any
    /// existing object at that key.
    async fn put(&self, key: &str, data: Bytes, metadata: BlobMetadata) -> AppResult<()>;

    /// Fetch an object's content and metadata by key.
    ///
    /// Fails with a `NotFound` error when no object exists at `key`.
    async fn get(&self, key: &str) -> AppResult<(Bytes, BlobMetadata)>;

    /// Delete the object at `key`. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Enumerate every object in the store with its metadata.
    ///
    /// The order is implementation-defined and not guaranteed stable
    /// between calls. Each call is a fresh snapshot of the store.
    async fn list(&self) -> AppResult<Vec<BlobObject>>;
}
