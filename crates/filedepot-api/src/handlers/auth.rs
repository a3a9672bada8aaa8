//! User registration and login handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::{StatusFields, TokenResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /users/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let token = state.user_service.login(&req.email, &req.password).await?;

    Ok(Json(TokenResponse {
        result: StatusFields::ok(),
        token,
    }))
}

/// POST /users/register — creates the account and logs the new user in,
/// returning a token directly.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    state
        .user_service
        .register(&req.email, &req.password)
        .await?;

    let token = state.user_service.login(&req.email, &req.password).await?;

    Ok(Json(TokenResponse {
        result: StatusFields::ok(),
        token,
    }))
}
