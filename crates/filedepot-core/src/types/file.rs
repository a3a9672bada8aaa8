//! File record domain types.

use bytes::Bytes;
use chrono::{DateTime, Utc};

/// A stored file together with its queryable metadata.
///
/// Identity is carried by `id` alone — many records may share a `name`,
/// many records may share an `owner_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct FileRecord {
    /// Opaque unique identifier, assigned at upload time.
    pub id: String,
    /// Identifier of the uploading principal.
    pub owner_id: String,
    /// Display name, not guaranteed unique.
    pub name: String,
    /// Creation timestamp supplied by the caller at upload, not the server
    /// clock.
    pub created_at: DateTime<Utc>,
    /// `false` when the stored timestamp failed to parse on read and
    /// `created_at` was substituted with the Unix epoch. Lets callers tell
    /// a genuine epoch timestamp apart from a mangled one.
    pub created_at_valid: bool,
    /// Raw byte payload.
    pub content: Bytes,
}

/// Caller-supplied data for a new upload. The `id` is never accepted from
/// the caller; the index assigns it.
#[derive(Debug, Clone)]
pub struct NewFileRecord {
    /// Identifier of the uploading principal.
    pub owner_id: String,
    /// Display name.
    pub name: String,
    /// Caller-supplied creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Raw byte payload.
    pub content: Bytes,
}
