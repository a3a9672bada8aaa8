//! Application state shared across all handlers.

use std::sync::Arc;

use filedepot_auth::JwtDecoder;
use filedepot_core::config::AppConfig;
use filedepot_core::traits::BlobStore;
use filedepot_service::{FileService, UserService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// File upload/lookup facade.
    pub file_service: Arc<FileService>,
    /// Registration and login.
    pub user_service: Arc<UserService>,
    /// Bearer token validator.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Backing blob store, for health checks.
    pub blob_store: Arc<dyn BlobStore>,
}
