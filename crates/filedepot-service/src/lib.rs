//! # filedepot-service
//!
//! Business logic facades. [`file::FileService`] validates inbound file
//! requests, enforces the ownership check, and maps index failures to the
//! error taxonomy. [`user::UserService`] handles registration and login.

pub mod file;
pub mod user;

pub use file::FileService;
pub use user::UserService;
