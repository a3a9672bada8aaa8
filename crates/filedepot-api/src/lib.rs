//! # filedepot-api
//!
//! HTTP gateway in front of the file and user services. Translates
//! multipart/JSON requests into service calls and maps the error taxonomy
//! onto HTTP status codes.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
