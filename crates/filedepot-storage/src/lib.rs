//! # filedepot-storage
//!
//! Blob store backends and the metadata file index.
//!
//! The [`index::FileIndex`] layers a filtered-query interface over any
//! [`filedepot_core::traits::BlobStore`], which itself only supports
//! key-based get and full enumeration.

pub mod index;
pub mod stores;

pub use index::FileIndex;
pub use stores::local::LocalBlobStore;
pub use stores::memory::MemoryBlobStore;
