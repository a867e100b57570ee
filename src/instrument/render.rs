//! Canonical Text Rendering
//!
//! The rendering contract for call-history entries. Version 1 of the
//! contract:
//!
//! - text renders as itself
//! - integers render in base-10 decimal
//! - floats render via their `Display` form
//! - binary renders as `0x` followed by lowercase hex
//! - keys render as their UUID string
//!
//! History entries written under this contract are stable and comparable;
//! the wrapper never relies on `Debug` formatting.

use crate::cache::{Key, StoredValue};

// == Canonical Text Trait ==
/// Renders a value into its canonical history-entry text.
pub trait CanonicalText {
    fn canonical_text(&self) -> String;
}

impl CanonicalText for StoredValue {
    fn canonical_text(&self) -> String {
        match self {
            StoredValue::Text(s) => s.clone(),
            StoredValue::Binary(b) => format!("0x{}", hex::encode(b)),
            StoredValue::Integer(i) => i.to_string(),
            StoredValue::Float(f) => f.to_string(),
        }
    }
}

impl CanonicalText for Key {
    fn canonical_text(&self) -> String {
        self.as_str().to_string()
    }
}

impl CanonicalText for String {
    fn canonical_text(&self) -> String {
        self.clone()
    }
}

impl CanonicalText for i64 {
    fn canonical_text(&self) -> String {
        self.to_string()
    }
}

impl CanonicalText for Vec<u8> {
    fn canonical_text(&self) -> String {
        format!("0x{}", hex::encode(self))
    }
}
