//! Content-addressed hashing primitives
//!
//! Provides [`SignalHash`], a strongly-typed 32-byte hash used as the
//! deterministic identity of every synthesized entity (facts, patterns,
//! assertions). Identical normalized input always yields an identical id;
//! no counters, wall-clock time, or randomness anywhere.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// A 32-byte content hash (Blake3)
///
/// Ordering is byte order, which equals the lexicographic order of the hex
/// form, so `SignalHash` can serve directly as the final sort tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SignalHash([u8; 32]);

impl SignalHash {
    /// Create a new SignalHash from raw bytes
    #[inline]
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get reference to the underlying bytes
    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Create hash from byte slice
    ///
    /// # Errors
    /// Returns error if slice length is not exactly 32 bytes
    #[inline]
    pub fn from_slice(bytes: &[u8]) -> Result<Self, HashError> {
        if bytes.len() != 32 {
            return Err(HashError::InvalidLength {
                expected: 32,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }

    /// Compute Blake3 hash of arbitrary data
    #[inline]
    #[must_use]
    pub fn compute(data: &[u8]) -> Self {
        let hash = blake3::hash(data);
        Self::new(*hash.as_bytes())
    }

    /// Compute hash over an ordered sequence of fields
    ///
    /// Each field is folded in with a length prefix, so `("ab", "c")` and
    /// `("a", "bc")` produce different hashes.
    #[must_use]
    pub fn compute_fields<S: AsRef<str>>(fields: &[S]) -> Self {
        let mut hasher = blake3::Hasher::new();
        for field in fields {
            let bytes = field.as_ref().as_bytes();
            hasher.update(&(bytes.len() as u64).to_le_bytes());
            hasher.update(bytes);
        }
        Self::new(*hasher.finalize().as_bytes())
    }

    /// Short string representation (first 16 hex chars)
    #[inline]
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..8])
    }
}

impl Display for SignalHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl FromStr for SignalHash {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s)?;
        Self::from_slice(&bytes)
    }
}

impl AsRef<[u8; 32]> for SignalHash {
    fn as_ref(&self) -> &[u8; 32] {
        &self.0
    }
}

// Serde implementations: hex string in human-readable formats
impl serde::Serialize for SignalHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_string())
        } else {
            serializer.serialize_bytes(&self.0)
        }
    }
}

impl<'de> serde::Deserialize<'de> for SignalHash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct SignalHashVisitor;

        impl serde::de::Visitor<'_> for SignalHashVisitor {
            type Value = SignalHash;

            fn expecting(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
                formatter.write_str("a 32-byte hash as hex string or byte array")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                value.parse().map_err(serde::de::Error::custom)
            }

            fn visit_bytes<E>(self, value: &[u8]) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                SignalHash::from_slice(value).map_err(serde::de::Error::custom)
            }
        }

        if deserializer.is_human_readable() {
            deserializer.deserialize_str(SignalHashVisitor)
        } else {
            deserializer.deserialize_bytes(SignalHashVisitor)
        }
    }
}

/// Errors that can occur when working with signal hashes
#[derive(Debug, thiserror::Error)]
pub enum HashError {
    /// Invalid hash length
    #[error("invalid hash length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Hex encoding error
    #[error("hex decode error: {0}")]
    HexDecode(#[from] hex::FromHexError),
}
