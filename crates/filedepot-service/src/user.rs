//! User registration and login.

use std::sync::Arc;

use tracing::info;

use filedepot_auth::{JwtEncoder, PasswordHasher};
use filedepot_core::error::AppError;
use filedepot_core::result::AppResult;
use filedepot_core::types::{CreateUser, User};
use filedepot_database::repositories::UserRepository;

/// Minimum length for email and password, matching the file-side
/// identifier rule.
const MIN_CREDENTIAL_LEN: usize = 3;

/// Registration and credential verification over the user repository.
#[derive(Debug, Clone)]
pub struct UserService {
    repo: Arc<UserRepository>,
    hasher: PasswordHasher,
    encoder: JwtEncoder,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(repo: Arc<UserRepository>, hasher: PasswordHasher, encoder: JwtEncoder) -> Self {
        Self {
            repo,
            hasher,
            encoder,
        }
    }

    /// Create a new user with a hashed password.
    ///
    /// A duplicate email surfaces as `Conflict` from the repository.
    pub async fn register(&self, email: &str, password: &str) -> AppResult<User> {
        validate_credentials(email, password)?;

        let password_hash = self.hasher.hash_password(password)?;
        let user = self
            .repo
            .create(CreateUser {
                email: email.to_string(),
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Verify credentials and issue a signed token.
    ///
    /// Unknown email and wrong password fail identically so the endpoint
    /// cannot be used to enumerate accounts.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<String> {
        validate_credentials(email, password)?;

        let user = self
            .repo
            .find_by_email(email)
            .await?
            .ok_or_else(invalid_credentials)?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            return Err(invalid_credentials());
        }

        let (token, _expires_at) = self.encoder.generate_token(user.id, &user.email)?;

        info!(user_id = %user.id, "User logged in");
        Ok(token)
    }
}

fn validate_credentials(email: &str, password: &str) -> AppResult<()> {
    if email.len() < MIN_CREDENTIAL_LEN {
        return Err(AppError::validation("email must be at least 3 characters"));
    }
    if password.len() < MIN_CREDENTIAL_LEN {
        return Err(AppError::validation(
            "password must be at least 3 characters",
        ));
    }
    Ok(())
}

fn invalid_credentials() -> AppError {
    AppError::authentication("invalid email or password")
}

#[cfg(test)]
mod tests {
    use super::*;
    use filedepot_core::error::ErrorKind;

    #[test]
    fn short_email_fails_validation() {
        let err = validate_credentials("ab", "secret").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn short_password_fails_validation() {
        let err = validate_credentials("a@b.c", "xy").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn minimum_length_credentials_pass() {
        assert!(validate_credentials("abc", "xyz").is_ok());
    }

    #[test]
    fn invalid_credentials_is_uniform_authentication_error() {
        // Unknown email and wrong password must produce the same error so
        // the login endpoint cannot be used to enumerate accounts.
        let unknown_email = invalid_credentials();
        let wrong_password = invalid_credentials();
        assert_eq!(unknown_email.kind, ErrorKind::Authentication);
        assert_eq!(unknown_email.message, wrong_password.message);
    }
}
