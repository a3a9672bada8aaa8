//! Route definitions for the FileDepot HTTP gateway.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
///
/// Receives the fully-constructed `AppState` and threads it through every
/// route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.storage.max_upload_size_bytes as usize;

    Router::new()
        .merge(file_routes())
        .merge(user_routes())
        .route("/health", get(handlers::health::health))
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// File upload, point lookup, and the two scan queries.
fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/files/upload", post(handlers::file::upload))
        .route("/files/{id}", get(handlers::file::get_file))
        .route("/files", get(handlers::file::list_files))
}

/// Registration and login, proxied to the user service.
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/register", post(handlers::auth::register))
        .route("/users/login", post(handlers::auth::login))
}
