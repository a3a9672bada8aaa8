//! File service facade over the metadata index.
//!
//! Validates inbound requests, enforces the record ownership check, and
//! maps index failures into the error taxonomy. The facade never retries;
//! every failure surfaces immediately with a mapped code.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

use filedepot_core::error::{AppError, ErrorKind};
use filedepot_core::result::AppResult;
use filedepot_core::types::{FileRecord, NewFileRecord};
use filedepot_storage::FileIndex;

/// Server-fixed result count for the list operations.
pub const LIST_LIMIT: usize = 10;

/// Minimum length for caller-supplied identifiers.
const MIN_ID_LEN: usize = 3;

/// Validates and adapts inbound file requests before delegating to the
/// [`FileIndex`]. One instance is shared across all request tasks; it
/// holds no mutable state beyond the store handle.
#[derive(Debug, Clone)]
pub struct FileService {
    index: Arc<FileIndex>,
    /// Upper bound applied to every index call.
    op_timeout: Duration,
}

impl FileService {
    /// Creates a new file service.
    pub fn new(index: Arc<FileIndex>, op_timeout: Duration) -> Self {
        Self { index, op_timeout }
    }

    /// Store a new file for `owner_id`.
    ///
    /// Fails with a validation error before touching the store when
    /// `owner_id` is shorter than three characters, or `name` or `content`
    /// is empty. Store failures surface as internal.
    pub async fn upload_file(
        &self,
        owner_id: &str,
        name: &str,
        created_at: DateTime<Utc>,
        content: Bytes,
    ) -> AppResult<FileRecord> {
        if owner_id.len() < MIN_ID_LEN {
            return Err(AppError::validation("owner_id must be at least 3 characters"));
        }
        if name.is_empty() {
            return Err(AppError::validation("name must not be empty"));
        }
        if content.is_empty() {
            return Err(AppError::validation("content must not be empty"));
        }

        let record = self
            .bounded(self.index.put(NewFileRecord {
                owner_id: owner_id.to_string(),
                name: name.to_string(),
                created_at,
                content,
            }))
            .await
            .map_err(internalize)?;

        info!(id = %record.id, owner_id, "File uploaded");
        Ok(record)
    }

    /// Point lookup by id, restricted to the record's owner.
    ///
    /// Fails with `PermissionDenied` when the record exists but belongs to
    /// a different owner than `requester_id`. This is the only per-request
    /// access control in the system and must not be bypassed.
    pub async fn get_file_by_id(&self, requester_id: &str, id: &str) -> AppResult<FileRecord> {
        if requester_id.len() < MIN_ID_LEN {
            return Err(AppError::validation(
                "requester_id must be at least 3 characters",
            ));
        }
        if id.len() < MIN_ID_LEN {
            return Err(AppError::validation("id must be at least 3 characters"));
        }

        let record = self
            .bounded(self.index.get_by_id(id))
            .await
            .map_err(internalize)?;

        if record.owner_id != requester_id {
            warn!(id, requester_id, "Ownership mismatch on file read");
            return Err(AppError::permission_denied("permission denied"));
        }

        Ok(record)
    }

    /// List up to [`LIST_LIMIT`] files matching `name` exactly, across all
    /// owners.
    ///
    /// All-or-nothing: fewer than the limit of matches fails with
    /// `NotFound`.
    pub async fn list_by_name(&self, name: &str) -> AppResult<Vec<FileRecord>> {
        if name.len() < MIN_ID_LEN {
            return Err(AppError::validation("name must be at least 3 characters"));
        }

        self.bounded(self.index.find_by_name(name, LIST_LIMIT))
            .await
            .map_err(internalize)
    }

    /// List up to [`LIST_LIMIT`] files owned by `owner_id`.
    ///
    /// Same all-or-nothing contract as [`FileService::list_by_name`].
    pub async fn list_by_owner(&self, owner_id: &str) -> AppResult<Vec<FileRecord>> {
        if owner_id.len() < MIN_ID_LEN {
            return Err(AppError::validation(
                "owner_id must be at least 3 characters",
            ));
        }

        self.bounded(self.index.find_by_owner(owner_id, LIST_LIMIT))
            .await
            .map_err(internalize)
    }

    /// Bound an index call by the configured operation timeout. No partial
    /// state is cleaned up on elapse; the store owns orphaned writes.
    async fn bounded<T>(&self, fut: impl Future<Output = AppResult<T>>) -> AppResult<T> {
        tokio::time::timeout(self.op_timeout, fut)
            .await
            .map_err(|_| AppError::cancelled("store operation timed out"))?
    }
}

/// Map store-level failures to `Internal`, preserving the codes the facade
/// contract passes through unchanged.
fn internalize(err: AppError) -> AppError {
    match err.kind {
        ErrorKind::NotFound | ErrorKind::Cancelled => err,
        _ => AppError::new(ErrorKind::Internal, err.message),
    }
}
