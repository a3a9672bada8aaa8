//! File upload, lookup, and list handlers.

use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use bytes::Bytes;
use chrono::{DateTime, Utc};

use filedepot_core::error::AppError;

use crate::dto::request::ListFilesQuery;
use crate::dto::response::{
    FileListResponse, FilePayload, FileResponse, StatusFields, UploadResponse,
};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /files/upload — multipart form with parts `file`, `name`, and
/// `created_at` (RFC3339). The owner is the authenticated caller.
pub async fn upload(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut name: Option<String> = None;
    let mut created_at: Option<String> = None;
    let mut data: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "name" => {
                name = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::validation(format!("Read error: {e}")))?,
                );
            }
            "created_at" => {
                created_at = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::validation(format!("Read error: {e}")))?,
                );
            }
            "file" => {
                data = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| AppError::validation(format!("Read error: {e}")))?,
                );
            }
            _ => {}
        }
    }

    let name = name.ok_or_else(|| AppError::validation("name is required"))?;
    let created_at = created_at.ok_or_else(|| AppError::validation("created_at is required"))?;
    let data = data.ok_or_else(|| AppError::validation("file is required"))?;

    let created_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&created_at)
        .map_err(|_| AppError::validation("created_at must be an RFC3339 timestamp"))?
        .with_timezone(&Utc);

    let record = state
        .file_service
        .upload_file(&auth.requester_id(), &name, created_at, data)
        .await?;

    Ok(Json(UploadResponse {
        result: StatusFields::ok(),
        id: record.id,
    }))
}

/// GET /files/{id} — point lookup, restricted to the record's owner.
pub async fn get_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<FileResponse>, ApiError> {
    let record = state
        .file_service
        .get_file_by_id(&auth.requester_id(), &id)
        .await?;

    Ok(Json(FileResponse {
        result: StatusFields::ok(),
        file: FilePayload::from(&record),
    }))
}

/// GET /files?name=... | GET /files?owner=... — the two scan queries.
pub async fn list_files(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListFilesQuery>,
) -> Result<Json<FileListResponse>, ApiError> {
    let records = match (query.name, query.owner) {
        (Some(name), None) => state.file_service.list_by_name(&name).await?,
        (None, Some(owner)) => state.file_service.list_by_owner(&owner).await?,
        _ => {
            return Err(
                AppError::validation("exactly one of 'name' or 'owner' is required").into(),
            );
        }
    };

    Ok(Json(FileListResponse {
        result: StatusFields::ok(),
        files: records.iter().map(FilePayload::from).collect(),
    }))
}
