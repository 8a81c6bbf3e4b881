//! Blob storage for froth stashes.
//!
//! A blob store is a flat namespace of opaque byte blobs. The namespace is
//! called the *destination*; each blob inside it is addressed by an *asset*
//! name. The store never interprets blob contents.
//!
//! # Storage Backends
//!
//! All backends implement the [`BlobStore`] trait:
//!
//! - [`LocalBlobStore`] -- one file per asset inside a destination directory
//! - [`InMemoryBlobStore`] -- `HashMap`-based store for tests and embedding
//!
//! # Design Rules
//!
//! 1. A missing asset is `Ok(None)`, never an error.
//! 2. `set` replaces the whole blob; there is no append or patch.
//! 3. Asset names are validated so a blob can never escape its destination.
//! 4. All I/O errors are propagated, never silently ignored.

pub mod error;
pub mod local;
pub mod memory;
pub mod names;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use local::LocalBlobStore;
pub use memory::InMemoryBlobStore;
pub use names::validate_asset_name;
pub use traits::BlobStore;
