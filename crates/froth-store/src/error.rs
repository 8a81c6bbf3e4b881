/// Errors from blob store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The destination could not be opened or created.
    #[error("store unavailable at {destination}: {reason}")]
    Unavailable { destination: String, reason: String },

    /// The asset name is not usable as a blob address.
    #[error("invalid asset name {name:?}: {reason}")]
    InvalidAssetName { name: String, reason: String },

    /// The store rejects writes.
    #[error("store is read-only")]
    ReadOnly,

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
