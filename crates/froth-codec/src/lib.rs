//! Typed value model and codecs for froth stashes.
//!
//! A stash holds a mapping of string keys to values of exactly three kinds:
//! text, a list of text, or an integer. This crate defines that value model
//! and the codecs that turn a whole mapping into bytes and back.
//!
//! # Codecs
//!
//! All codecs implement the [`Codec`] trait:
//!
//! - [`BincodeCodec`] -- compact binary encoding (the default)
//! - [`JsonCodec`] -- human-readable JSON, useful when inspecting blobs by hand
//! - [`CodecKind`] -- runtime selection between the two
//!
//! Every codec must round-trip: `decode(encode(m)) == m`, with each value
//! keeping its kind.

pub mod codec;
pub mod error;
pub mod value;

pub use codec::{BincodeCodec, Codec, CodecKind, JsonCodec};
pub use error::{CodecError, CodecResult};
pub use value::{Value, ValueKind, ValueMap};
