//! Stored Value Module
//!
//! The closed set of scalar kinds the typed cache accepts, with their byte
//! serialization, and the generated keys they are stored under.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// == Stored Value ==
/// A scalar value accepted by the typed cache.
///
/// The store itself is byte-oriented; the kind is recovered only through the
/// decode function supplied at read time. Any other kind of value is
/// unrepresentable here, so there is no runtime rejection path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum StoredValue {
    /// UTF-8 text
    Text(String),
    /// Raw bytes
    Binary(Vec<u8>),
    /// Signed integer, stored as base-10 decimal ASCII
    Integer(i64),
    /// Floating-point number, stored as its Display form
    Float(f64),
}

impl StoredValue {
    // == Byte Serialization ==
    /// Serializes the value to the raw bytes written to the store.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            StoredValue::Text(s) => s.as_bytes().to_vec(),
            StoredValue::Binary(b) => b.clone(),
            StoredValue::Integer(i) => i.to_string().into_bytes(),
            StoredValue::Float(f) => f.to_string().into_bytes(),
        }
    }
}

// == Key ==
/// A globally-unique opaque identifier for one stored value.
///
/// Generated as a 128-bit random UUID rendered in its hyphenated textual
/// form; never reused within a cache instance's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Key(String);

impl Key {
    // == Generate ==
    /// Generates a fresh random key.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the textual form of the key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
