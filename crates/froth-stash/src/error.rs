use froth_codec::{CodecError, ValueKind};
use froth_store::StoreError;
use thiserror::Error;

/// Errors from stash operations.
#[derive(Debug, Error)]
pub enum StashError {
    /// The backing store could not be opened, read, or written.
    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),

    /// The stored blob is not a valid value mapping.
    #[error("cannot decode stash {asset}: {source}")]
    Decode {
        asset: String,
        #[source]
        source: CodecError,
    },

    /// The in-memory mapping could not be serialized.
    #[error("cannot encode stash {asset}: {source}")]
    Encode {
        asset: String,
        #[source]
        source: CodecError,
    },

    /// A key was read with an accessor for a different kind than it holds.
    #[error("type mismatch for key {key:?}: expected {expected}, found {found}")]
    TypeMismatch {
        key: String,
        expected: ValueKind,
        found: ValueKind,
    },

    /// The configuration file could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),
}

/// Result alias for stash operations.
pub type StashResult<T> = Result<T, StashError>;
