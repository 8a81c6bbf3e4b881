/// Errors from encoding or decoding a value mapping.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The mapping could not be serialized.
    #[error("encode error: {0}")]
    Encode(String),

    /// The bytes do not describe a valid value mapping.
    #[error("decode error: {0}")]
    Decode(String),
}

/// Result alias for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
