//! In-memory blob store, used in tests and single-process development.

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;

use filedepot_core::error::AppError;
use filedepot_core::result::AppResult;
use filedepot_core::traits::{BlobMetadata, BlobObject, BlobStore};

/// A blob store backed by a concurrent in-process map.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    objects: DashMap<String, (Bytes, BlobMetadata)>,
}

impl MemoryBlobStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the store holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    fn store_type(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn put(&self, key: &str, data: Bytes, metadata: BlobMetadata) -> AppResult<()> {
        self.objects.insert(key.to_string(), (data, metadata));
        Ok(())
    }

    async fn get(&self, key: &str) -> AppResult<(Bytes, BlobMetadata)> {
        self.objects
            .get(key)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::not_found(format!("Object not found: {key}")))
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.objects.remove(key);
        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<BlobObject>> {
        Ok(self
            .objects
            .iter()
            .map(|entry| BlobObject {
                key: entry.key().clone(),
                metadata: entry.value().1.clone(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filedepot_core::error::ErrorKind;

    #[tokio::test]
    async fn put_get_delete_cycle() {
        let store = MemoryBlobStore::new();
        let mut meta = BlobMetadata::new();
        meta.insert("name".to_string(), "a".to_string());

        store
            .put("k1", Bytes::from_static(b"data"), meta.clone())
            .await
            .unwrap();
        let (data, fetched_meta) = store.get("k1").await.unwrap();
        assert_eq!(data, Bytes::from_static(b"data"));
        assert_eq!(fetched_meta, meta);

        store.delete("k1").await.unwrap();
        let err = store.get("k1").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn delete_missing_key_is_ok() {
        let store = MemoryBlobStore::new();
        store.delete("ghost").await.unwrap();
    }

    #[tokio::test]
    async fn list_returns_metadata_without_content() {
        let store = MemoryBlobStore::new();
        for i in 0..3 {
            let mut meta = BlobMetadata::new();
            meta.insert("n".to_string(), i.to_string());
            store
                .put(&format!("k{i}"), Bytes::from_static(b"x"), meta)
                .await
                .unwrap();
        }

        let objects = store.list().await.unwrap();
        assert_eq!(objects.len(), 3);
        assert!(objects.iter().all(|o| o.metadata.contains_key("n")));
    }
}
