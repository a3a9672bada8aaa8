//! The metadata file index — filtered queries layered over a blob store.
//!
//! The backing [`BlobStore`] only supports key-based get and full
//! enumeration, so `find_by_name` / `find_by_owner` are linear scans over
//! every object in the store. This is explicitly not an index structure;
//! query cost is O(total objects) per call.

use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

use filedepot_core::error::AppError;
use filedepot_core::result::AppResult;
use filedepot_core::traits::{BlobMetadata, BlobStore};
use filedepot_core::types::{FileRecord, NewFileRecord};

/// Metadata key for the uploading principal.
pub const META_OWNER_ID: &str = "owner_id";
/// Metadata key for the display name.
pub const META_NAME: &str = "name";
/// Metadata key for the caller-supplied creation timestamp (RFC3339).
pub const META_CREATED_AT: &str = "created_at";

/// Stores file bytes with attached queryable metadata and answers point
/// lookups and scan-filter queries against any [`BlobStore`].
///
/// The index exclusively owns the mapping from record id to stored bytes
/// and metadata; no other component writes to the store directly.
#[derive(Debug, Clone)]
pub struct FileIndex {
    store: Arc<dyn BlobStore>,
}

impl FileIndex {
    /// Create an index over the given blob store.
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self { store }
    }

    /// Reference to the backing store, for health checks.
    pub fn store(&self) -> &Arc<dyn BlobStore> {
        &self.store
    }

    /// Store a new record, assigning a fresh unique id.
    ///
    /// The returned record echoes the caller's fields; nothing is re-read
    /// from the store after the write.
    pub async fn put(&self, new: NewFileRecord) -> AppResult<FileRecord> {
        let id = Uuid::new_v4().to_string();

        let mut metadata = BlobMetadata::new();
        metadata.insert(META_OWNER_ID.to_string(), new.owner_id.clone());
        metadata.insert(META_NAME.to_string(), new.name.clone());
        metadata.insert(
            META_CREATED_AT.to_string(),
            new.created_at.to_rfc3339_opts(SecondsFormat::Nanos, true),
        );

        self.store.put(&id, new.content.clone(), metadata).await?;

        debug!(id, owner_id = %new.owner_id, bytes = new.content.len(), "Stored file");

        Ok(FileRecord {
            id,
            owner_id: new.owner_id,
            name: new.name,
            created_at: new.created_at,
            created_at_valid: true,
            content: new.content,
        })
    }

    /// Point lookup by id. Fails with `NotFound` when no blob exists.
    pub async fn get_by_id(&self, id: &str) -> AppResult<FileRecord> {
        let (content, metadata) = self.store.get(id).await?;
        Ok(assemble_record(id.to_string(), content, &metadata))
    }

    /// Scan every object for an exact metadata match on `name`.
    pub async fn find_by_name(&self, name: &str, limit: usize) -> AppResult<Vec<FileRecord>> {
        self.scan(META_NAME, name, limit).await
    }

    /// Scan every object for an exact metadata match on `owner_id`.
    pub async fn find_by_owner(&self, owner_id: &str, limit: usize) -> AppResult<Vec<FileRecord>> {
        self.scan(META_OWNER_ID, owner_id, limit).await
    }

    /// Enumerate the whole store in iterator order, collecting records
    /// whose metadata value at `meta_key` equals `wanted`, stopping once
    /// `limit` matches are collected.
    ///
    /// All-or-nothing contract: a scan that completes with fewer than
    /// `limit` matches fails with `NotFound` and the partial set is
    /// discarded.
    async fn scan(&self, meta_key: &str, wanted: &str, limit: usize) -> AppResult<Vec<FileRecord>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let mut matches = Vec::with_capacity(limit);
        for obj in self.store.list().await? {
            if obj.metadata.get(meta_key).map(String::as_str) != Some(wanted) {
                continue;
            }

            // Content is fetched only for accepted matches; the predicate
            // runs on the enumeration metadata alone.
            let (content, metadata) = self.store.get(&obj.key).await?;
            matches.push(assemble_record(obj.key, content, &metadata));

            if matches.len() >= limit {
                return Ok(matches);
            }
        }

        debug!(
            meta_key,
            wanted,
            found = matches.len(),
            limit,
            "Scan completed below limit"
        );
        Err(AppError::not_found(format!(
            "scan found {} of {limit} requested records",
            matches.len()
        )))
    }
}

/// Reconstitute a record from stored content and metadata.
///
/// A timestamp that fails to parse is substituted with the Unix epoch and
/// flagged via `created_at_valid` instead of failing the read.
fn assemble_record(id: String, content: Bytes, metadata: &BlobMetadata) -> FileRecord {
    let raw_created_at = metadata.get(META_CREATED_AT).map(String::as_str);
    let (created_at, created_at_valid) = match raw_created_at
        .map(DateTime::parse_from_rfc3339)
    {
        Some(Ok(ts)) => (ts.with_timezone(&Utc), true),
        _ => {
            warn!(id, raw = ?raw_created_at, "Unparseable created_at metadata, substituting epoch");
            (DateTime::<Utc>::UNIX_EPOCH, false)
        }
    };

    FileRecord {
        id,
        owner_id: metadata
            .get(META_OWNER_ID)
            .cloned()
            .unwrap_or_default(),
        name: metadata.get(META_NAME).cloned().unwrap_or_default(),
        created_at,
        created_at_valid,
        content,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::TimeZone;
    use filedepot_core::error::ErrorKind;
    use filedepot_core::traits::BlobObject;

    use crate::stores::memory::MemoryBlobStore;

    fn index() -> (Arc<MemoryBlobStore>, FileIndex) {
        let store = Arc::new(MemoryBlobStore::new());
        let idx = FileIndex::new(store.clone() as Arc<dyn BlobStore>);
        (store, idx)
    }

    fn record(owner: &str, name: &str) -> NewFileRecord {
        NewFileRecord {
            owner_id: owner.to_string(),
            name: name.to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 5, 17, 10, 30, 0).unwrap(),
            content: Bytes::from_static(b"payload"),
        }
    }

    #[tokio::test]
    async fn put_assigns_distinct_ids() {
        let (_, idx) = index();
        let a = idx.put(record("u1", "a.png")).await.unwrap();
        let b = idx.put(record("u1", "a.png")).await.unwrap();
        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn get_by_id_round_trips() {
        let (_, idx) = index();
        let stored = idx.put(record("u1", "a.png")).await.unwrap();

        let fetched = idx.get_by_id(&stored.id).await.unwrap();
        assert_eq!(fetched.owner_id, "u1");
        assert_eq!(fetched.name, "a.png");
        assert_eq!(fetched.content, Bytes::from_static(b"payload"));
        assert_eq!(fetched.created_at, stored.created_at);
        assert!(fetched.created_at_valid);
    }

    #[tokio::test]
    async fn get_by_id_unknown_is_not_found() {
        let (_, idx) = index();
        let err = idx.get_by_id("no-such-id").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn mangled_timestamp_reads_as_flagged_epoch() {
        let (store, idx) = index();

        let mut metadata = BlobMetadata::new();
        metadata.insert(META_OWNER_ID.to_string(), "u1".to_string());
        metadata.insert(META_NAME.to_string(), "a.png".to_string());
        metadata.insert(META_CREATED_AT.to_string(), "not-a-timestamp".to_string());
        store
            .put("mangled", Bytes::from_static(b"x"), metadata)
            .await
            .unwrap();

        let fetched = idx.get_by_id("mangled").await.unwrap();
        assert_eq!(fetched.created_at, DateTime::<Utc>::UNIX_EPOCH);
        assert!(!fetched.created_at_valid);
    }

    #[tokio::test]
    async fn find_by_owner_below_limit_is_not_found() {
        let (_, idx) = index();
        for _ in 0..3 {
            idx.put(record("u1", "a.png")).await.unwrap();
        }

        // Three matches exist but ten were requested: the partial set is
        // discarded.
        let err = idx.find_by_owner("u1", 10).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn find_by_owner_at_limit_returns_matches() {
        let (_, idx) = index();
        for _ in 0..3 {
            idx.put(record("u1", "a.png")).await.unwrap();
        }
        idx.put(record("u2", "b.png")).await.unwrap();

        let found = idx.find_by_owner("u1", 3).await.unwrap();
        assert_eq!(found.len(), 3);
        assert!(found.iter().all(|r| r.owner_id == "u1"));
    }

    #[tokio::test]
    async fn find_by_name_stops_at_limit() {
        let (_, idx) = index();
        for _ in 0..5 {
            idx.put(record("u1", "dup.png")).await.unwrap();
        }

        let found = idx.find_by_name("dup.png", 2).await.unwrap();
        assert_eq!(found.len(), 2);
    }

    #[tokio::test]
    async fn find_by_name_ignores_other_names() {
        let (_, idx) = index();
        idx.put(record("u1", "a.png")).await.unwrap();
        idx.put(record("u1", "b.png")).await.unwrap();

        let found = idx.find_by_name("a.png", 1).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "a.png");
    }

    /// Delegating store that counts content reads, to pin down the lazy
    /// fetch behavior of the scan.
    #[derive(Debug)]
    struct CountingStore {
        inner: MemoryBlobStore,
        gets: AtomicUsize,
    }

    #[async_trait]
    impl BlobStore for CountingStore {
        fn store_type(&self) -> &str {
            "counting"
        }

        async fn health_check(&self) -> AppResult<bool> {
            self.inner.health_check().await
        }

        async fn put(&self, key: &str, data: Bytes, metadata: BlobMetadata) -> AppResult<()> {
            self.inner.put(key, data, metadata).await
        }

        async fn get(&self, key: &str) -> AppResult<(Bytes, BlobMetadata)> {
            self.gets.fetch_add(1, Ordering::SeqCst);
            self.inner.get(key).await
        }

        async fn delete(&self, key: &str) -> AppResult<()> {
            self.inner.delete(key).await
        }

        async fn list(&self) -> AppResult<Vec<BlobObject>> {
            self.inner.list().await
        }
    }

    #[tokio::test]
    async fn scan_fetches_content_only_for_matches() {
        let store = Arc::new(CountingStore {
            inner: MemoryBlobStore::new(),
            gets: AtomicUsize::new(0),
        });
        let idx = FileIndex::new(store.clone() as Arc<dyn BlobStore>);

        idx.put(record("u1", "wanted.png")).await.unwrap();
        for _ in 0..4 {
            idx.put(record("u2", "other.png")).await.unwrap();
        }

        store.gets.store(0, Ordering::SeqCst);
        let found = idx.find_by_name("wanted.png", 1).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(store.gets.load(Ordering::SeqCst), 1);
    }
}
