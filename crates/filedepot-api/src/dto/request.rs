//! Inbound request bodies and query parameters.

use serde::{Deserialize, Serialize};

/// Body for `POST /users/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Login email.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// Body for `POST /users/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Login email.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// Query parameters for `GET /files`. Exactly one filter must be present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListFilesQuery {
    /// Exact display name to match.
    pub name: Option<String>,
    /// Exact owner id to match.
    pub owner: Option<String>,
}
