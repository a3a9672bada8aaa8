//! `AuthUser` extractor — pulls the JWT from the Authorization header and
//! validates it.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use filedepot_auth::Claims;
use filedepot_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated caller available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// The caller's user id in its wire form, used as the requester and
    /// owner identifier on file operations.
    pub fn requester_id(&self) -> String {
        self.0.user_id().to_string()
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::authentication("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::authentication("Invalid Authorization header format"))?;

        let claims = state.jwt_decoder.decode(token)?;
        Ok(AuthUser(claims))
    }
}
