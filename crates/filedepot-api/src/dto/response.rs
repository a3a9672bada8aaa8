//! Outbound response bodies.
//!
//! Every body carries the gateway status triple `{status, ok, error}`;
//! successful responses add their payload fields next to it.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use filedepot_core::types::FileRecord;

/// The `{status, ok, error}` triple present in every response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusFields {
    /// HTTP status code, duplicated into the body.
    pub status: u16,
    /// `"ok"` on success, empty on failure.
    #[serde(default)]
    pub ok: String,
    /// Error message, empty on success.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub error: String,
}

impl StatusFields {
    /// Successful status triple.
    pub fn ok() -> Self {
        Self {
            status: 200,
            ok: "ok".to_string(),
            error: String::new(),
        }
    }

    /// Failed status triple.
    pub fn error(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            ok: String::new(),
            error: message.into(),
        }
    }
}

/// Body for a successful upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(flatten)]
    pub result: StatusFields,
    /// Generated record id.
    pub id: String,
}

/// Body for successful login/register.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    #[serde(flatten)]
    pub result: StatusFields,
    /// Signed bearer token.
    pub token: String,
}

/// Wire form of a file record. Content travels base64-encoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilePayload {
    /// Record id.
    pub id: String,
    /// Owning principal.
    pub owner_id: String,
    /// Display name.
    pub name: String,
    /// Caller-supplied creation timestamp.
    pub created_at: DateTime<Utc>,
    /// `false` when the stored timestamp failed to parse on read.
    pub created_at_valid: bool,
    /// Base64-encoded content.
    pub content: String,
}

impl From<&FileRecord> for FilePayload {
    fn from(record: &FileRecord) -> Self {
        Self {
            id: record.id.clone(),
            owner_id: record.owner_id.clone(),
            name: record.name.clone(),
            created_at: record.created_at,
            created_at_valid: record.created_at_valid,
            content: BASE64.encode(&record.content),
        }
    }
}

/// Body for a single-record read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileResponse {
    #[serde(flatten)]
    pub result: StatusFields,
    /// The record.
    pub file: FilePayload,
}

/// Body for the list operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileListResponse {
    #[serde(flatten)]
    pub result: StatusFields,
    /// Matching records, at most the server-fixed limit.
    pub files: Vec<FilePayload>,
}

/// Body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"ok"` or `"degraded"`.
    pub status: String,
    /// Backing blob store type.
    pub store: String,
}
