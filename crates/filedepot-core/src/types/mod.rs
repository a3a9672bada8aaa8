//! Domain types shared across FileDepot crates.

pub mod file;
pub mod user;

pub use file::{FileRecord, NewFileRecord};
pub use user::{CreateUser, User};
