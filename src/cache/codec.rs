//! Payload Codec Module
//!
//! Converts caller values into the type-erased form held by the store.
//! Small values stay as live JSON; values whose serialized form exceeds
//! the compression threshold (or that the caller flags) are gzipped.

use std::io::{Read, Write};

use flate2::{read::GzDecoder, write::GzEncoder, Compression};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::error::{CacheError, Result};

/// Serialized size above which a payload is stored compressed.
pub const COMPRESSION_THRESHOLD_BYTES: usize = 1024;

// == Payload ==
/// Stored form of a cached value.
#[derive(Debug, Clone)]
pub enum Payload {
    /// Live JSON value
    Plain(Value),
    /// Gzip-compressed JSON bytes
    Compressed(Vec<u8>),
}

impl Payload {
    // == Encode ==
    /// Serializes `value` and picks its stored form.
    ///
    /// Returns the payload and its footprint in bytes (serialized length
    /// for plain payloads, compressed length otherwise).
    pub fn encode<T: Serialize + ?Sized>(value: &T, force_compress: bool) -> Result<(Self, usize)> {
        let value = serde_json::to_value(value)?;
        let json = serde_json::to_vec(&value)?;

        if force_compress || json.len() > COMPRESSION_THRESHOLD_BYTES {
            let bytes = compress(&json)?;
            let size = bytes.len();
            Ok((Payload::Compressed(bytes), size))
        } else {
            Ok((Payload::Plain(value), json.len()))
        }
    }

    // == Decode ==
    /// Rebuilds a typed value, decompressing first when needed.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        match self {
            Payload::Plain(value) => Ok(T::deserialize(value)?),
            Payload::Compressed(bytes) => {
                let json = decompress(bytes)?;
                Ok(serde_json::from_slice(&json)?)
            }
        }
    }

    pub fn is_compressed(&self) -> bool {
        matches!(self, Payload::Compressed(_))
    }
}

fn compress(input: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(input)
        .map_err(|e| CacheError::Compression(e.to_string()))?;
    encoder
        .finish()
        .map_err(|e| CacheError::Compression(e.to_string()))
}

fn decompress(input: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(input);
    let mut out = Vec::with_capacity(input.len() * 4);
    decoder
        .read_to_end(&mut out)
        .map_err(|e| CacheError::Compression(e.to_string()))?;
    Ok(out)
}
