//! Local filesystem blob store.
//!
//! Object content lives at `<root>/<key>`; the metadata map is persisted
//! next to it in a `<key>.meta.json` sidecar.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tracing::debug;

use filedepot_core::error::{AppError, ErrorKind};
use filedepot_core::result::AppResult;
use filedepot_core::traits::{BlobMetadata, BlobObject, BlobStore};

const META_SUFFIX: &str = ".meta.json";

/// Blob store rooted at a local directory.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    /// Create a store rooted at the given path, creating it if missing.
    pub async fn new(root_path: &str) -> AppResult<Self> {
        let root = PathBuf::from(root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    fn object_path(&self, key: &str) -> AppResult<PathBuf> {
        Ok(self.root.join(checked_key(key)?))
    }

    fn sidecar_path(&self, key: &str) -> AppResult<PathBuf> {
        Ok(self.root.join(format!("{}{META_SUFFIX}", checked_key(key)?)))
    }

    /// Read the sidecar for a key. A missing or corrupt sidecar yields an
    /// empty map rather than failing the read.
    async fn read_metadata(&self, sidecar: &Path) -> BlobMetadata {
        match fs::read(sidecar).await {
            Ok(raw) => serde_json::from_slice(&raw).unwrap_or_default(),
            Err(_) => BlobMetadata::default(),
        }
    }
}

/// Keys are single path components under the root. Anything that could
/// resolve outside it reads as a missing object.
fn checked_key(key: &str) -> AppResult<&str> {
    if key.is_empty() || key == "." || key == ".." || key.contains(['/', '\\']) {
        return Err(AppError::not_found(format!("Object not found: {key}")));
    }
    Ok(key)
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    fn store_type(&self) -> &str {
        "local"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(self.root.exists() && self.root.is_dir())
    }

    async fn put(&self, key: &str, data: Bytes, metadata: BlobMetadata) -> AppResult<()> {
        let path = self.object_path(key)?;
        fs::write(&path, &data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write object: {key}"),
                e,
            )
        })?;

        let sidecar = self.sidecar_path(key)?;
        let raw = serde_json::to_vec(&metadata)?;
        fs::write(&sidecar, raw).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write object metadata: {key}"),
                e,
            )
        })?;

        debug!(key, bytes = data.len(), "Wrote object");
        Ok(())
    }

    async fn get(&self, key: &str) -> AppResult<(Bytes, BlobMetadata)> {
        let path = self.object_path(key)?;
        let data = fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found(format!("Object not found: {key}"))
            } else {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to read object: {key}"),
                    e,
                )
            }
        })?;

        let metadata = self.read_metadata(&self.sidecar_path(key)?).await;
        Ok((Bytes::from(data), metadata))
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        for path in [self.object_path(key)?, self.sidecar_path(key)?] {
            if path.exists() {
                fs::remove_file(&path).await.map_err(|e| {
                    AppError::with_source(
                        ErrorKind::Storage,
                        format!("Failed to delete object: {key}"),
                        e,
                    )
                })?;
            }
        }
        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<BlobObject>> {
        let mut entries = fs::read_dir(&self.root).await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Failed to enumerate storage root", e)
        })?;

        let mut objects = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Failed to enumerate storage root", e)
        })? {
            let file_name = entry.file_name();
            let Some(key) = file_name.to_str() else {
                continue;
            };
            if key.ends_with(META_SUFFIX) {
                continue;
            }
            if !entry.path().is_file() {
                continue;
            }

            let metadata = self.read_metadata(&self.sidecar_path(key)?).await;
            objects.push(BlobObject {
                key: key.to_string(),
                metadata,
            });
        }

        Ok(objects)
    }
}
