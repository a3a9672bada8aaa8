//! Trait seams implemented by other FileDepot crates.

pub mod blob;

pub use blob::{BlobMetadata, BlobObject, BlobStore};
