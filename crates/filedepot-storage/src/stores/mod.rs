//! Blob store backends.

pub mod local;
pub mod memory;
