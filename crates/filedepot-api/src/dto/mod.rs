//! Request and response wire types.

pub mod request;
pub mod response;
