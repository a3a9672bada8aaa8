//! # filedepot-auth
//!
//! JWT token issuance/validation and Argon2id password hashing.
//! Token validation is the only per-request authentication in the system;
//! authorization (record ownership) lives in the file service.

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::PasswordHasher;
