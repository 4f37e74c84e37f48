//! Content hashing for resolved interface models.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 128-bit content hash computed using XXH3.
///
/// Two resolved models with the same `ContentHash` are assumed to be
/// bit-identical. Used to check that resolution is deterministic and to detect
/// whether an override actually changed the resolved model.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash([u8; 16]);

/// Error raised when a value cannot be encoded for hashing.
#[derive(Debug, thiserror::Error)]
#[error("failed to encode value for hashing: {0}")]
pub struct HashError(String);

impl ContentHash {
    /// Computes a content hash from a byte slice using XXH3-128.
    pub fn from_bytes(data: &[u8]) -> Self {
        let hash = xxhash_rust::xxh3::xxh3_128(data);
        Self(hash.to_le_bytes())
    }

    /// Computes a content hash of the bincode encoding of `value`.
    pub fn of<T: Serialize>(value: &T) -> Result<Self, HashError> {
        let bytes = bincode::serde::encode_to_vec(value, bincode::config::standard())
            .map_err(|e| HashError(e.to_string()))?;
        Ok(Self::from_bytes(&bytes))
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({self})")
    }
}
