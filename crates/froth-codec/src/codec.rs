use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CodecError, CodecResult};
use crate::value::ValueMap;

/// Converts a whole value mapping to bytes and back.
///
/// Implementations must preserve each value's kind across a round trip:
/// `decode(encode(m)) == m` for every mapping `m`.
pub trait Codec: Send + Sync {
    /// Serialize the entire mapping.
    fn encode(&self, values: &ValueMap) -> CodecResult<Vec<u8>>;

    /// Deserialize a mapping previously produced by [`Codec::encode`].
    fn decode(&self, bytes: &[u8]) -> CodecResult<ValueMap>;
}

/// Compact binary codec built on bincode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BincodeCodec;

impl Codec for BincodeCodec {
    fn encode(&self, values: &ValueMap) -> CodecResult<Vec<u8>> {
        bincode::serialize(values).map_err(|e| CodecError::Encode(e.to_string()))
    }

    fn decode(&self, bytes: &[u8]) -> CodecResult<ValueMap> {
        bincode::deserialize(bytes).map_err(|e| CodecError::Decode(e.to_string()))
    }
}

/// Human-readable JSON codec.
///
/// Values are externally tagged (`{"Integer": 3}`), so kinds survive the
/// round trip even where JSON itself would be ambiguous.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode(&self, values: &ValueMap) -> CodecResult<Vec<u8>> {
        serde_json::to_vec(values).map_err(|e| CodecError::Encode(e.to_string()))
    }

    fn decode(&self, bytes: &[u8]) -> CodecResult<ValueMap> {
        serde_json::from_slice(bytes).map_err(|e| CodecError::Decode(e.to_string()))
    }
}

/// Runtime choice of codec, as named in configuration files and on the
/// command line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodecKind {
    #[default]
    Bincode,
    Json,
}

impl Codec for CodecKind {
    fn encode(&self, values: &ValueMap) -> CodecResult<Vec<u8>> {
        match self {
            Self::Bincode => BincodeCodec.encode(values),
            Self::Json => JsonCodec.encode(values),
        }
    }

    fn decode(&self, bytes: &[u8]) -> CodecResult<ValueMap> {
        match self {
            Self::Bincode => BincodeCodec.decode(bytes),
            Self::Json => JsonCodec.decode(bytes),
        }
    }
}

impl std::fmt::Display for CodecKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bincode => write!(f, "bincode"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl FromStr for CodecKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bincode" => Ok(Self::Bincode),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown codec: {other:?} (expected bincode or json)")),
        }
    }
}
