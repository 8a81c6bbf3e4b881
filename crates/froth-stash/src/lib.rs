//! Persistent typed key-value stash.
//!
//! A [`Stash`] associates an asset inside a destination with a mapping of
//! string keys to typed values (text, text lists, integers). The mapping is
//! loaded once at construction and written through to the backing
//! [`BlobStore`] after every mutation: each `set*` call re-encodes the whole
//! mapping and overwrites the asset's blob before returning.
//!
//! ```no_run
//! use froth_stash::Stash;
//!
//! let mut stash = Stash::open("/tmp/d", "catalog")?;
//! stash.set_string("title", "Froth")?;
//! stash.set_int("count", 3)?;
//! assert_eq!(stash.get_string("title")?, Some("Froth"));
//! # Ok::<(), froth_stash::StashError>(())
//! ```
//!
//! # Modules
//!
//! - [`stash`] -- the [`Stash`] itself
//! - [`config`] -- [`StashConfig`], loadable from TOML
//! - [`error`] -- [`StashError`]

pub mod config;
pub mod error;
pub mod stash;

pub use config::StashConfig;
pub use error::{StashError, StashResult};
pub use stash::Stash;

pub use froth_codec::{BincodeCodec, Codec, CodecKind, JsonCodec, Value, ValueKind, ValueMap};
pub use froth_store::{BlobStore, InMemoryBlobStore, LocalBlobStore};
