//! Native store identifiers and the identifier normalizer.
//!
//! The document store keys every record with a 12-byte object id, rendered
//! externally as 24 hex characters. Every store call in the catalog receives a
//! normalized [`ObjectId`]; raw strings never reach the store.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::IdError;

/// Length of the external hex representation.
pub const HEX_LEN: usize = 24;

/// A store-native record key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ObjectId([u8; 12]);

impl ObjectId {
    /// Build a key from its raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 12]) -> Self {
        Self(bytes)
    }

    /// Raw key bytes.
    #[must_use]
    pub const fn bytes(&self) -> &[u8; 12] {
        &self.0
    }

    /// Parse an external identifier.
    ///
    /// Accepts exactly 24 hex digits in either case. Surrounding whitespace is
    /// not trimmed and counts as malformed input.
    ///
    /// # Errors
    ///
    /// Returns `IdError` when the input is the wrong length or not hex.
    pub fn parse(raw: &str) -> Result<Self, IdError> {
        if raw.len() != HEX_LEN {
            return Err(IdError::Length {
                id: raw.to_string(),
                len: raw.chars().count(),
            });
        }
        let mut bytes = [0u8; 12];
        hex::decode_to_slice(raw, &mut bytes).map_err(|_| IdError::NotHex {
            id: raw.to_string(),
        })?;
        Ok(Self(bytes))
    }

    /// Lowercase hex rendering, as stored and returned to callers.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

/// Convert an external string identifier into the store's native key.
///
/// # Errors
///
/// Returns `IdError` when the identifier does not match the key format.
pub fn normalize(raw: &str) -> Result<ObjectId, IdError> {
    ObjectId::parse(raw)
}

impl FromStr for ObjectId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.to_hex())
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
