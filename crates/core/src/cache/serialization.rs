//! Pure functions for serializing/deserializing bins to/from cache bytes.
//!
//! Cached bins are wrapped in a small JSON envelope carrying an encoding
//! version. A payload with an unknown version is rejected rather than
//! guessed at.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bins::Bin;

/// Encoding version written into every cached payload.
pub const CACHE_ENCODING_VERSION: u8 = 1;

/// Errors that can occur during cache serialization/deserialization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializationError {
    /// Failed to serialize a value to bytes.
    #[error("Failed to serialize: {0}")]
    SerializeFailed(String),
    /// Failed to deserialize bytes to a value.
    #[error("Failed to deserialize: {0}")]
    DeserializeFailed(String),
}

/// Result type for serialization operations.
pub type Result<T> = std::result::Result<T, SerializationError>;

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    v: u8,
    bin: &'a Bin,
}

#[derive(Deserialize)]
struct Envelope {
    v: u8,
    bin: serde_json::Value,
}

/// Serializes a bin to versioned JSON bytes.
pub fn serialize_bin(bin: &Bin) -> Result<Vec<u8>> {
    let envelope = EnvelopeRef {
        v: CACHE_ENCODING_VERSION,
        bin,
    };
    serde_json::to_vec(&envelope).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes versioned JSON bytes to a bin.
///
/// Fails on malformed JSON, missing fields, or an unsupported version.
pub fn deserialize_bin(bytes: &[u8]) -> Result<Bin> {
    let envelope: Envelope = serde_json::from_slice(bytes)
        .map_err(|e| SerializationError::DeserializeFailed(e.to_string()))?;

    if envelope.v != CACHE_ENCODING_VERSION {
        return Err(SerializationError::DeserializeFailed(format!(
            "unsupported cache encoding version {}",
            envelope.v
        )));
    }

    serde_json::from_value(envelope.bin)
        .map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}
