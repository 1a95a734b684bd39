//! Barcodes

use std::{borrow::Borrow, fmt, ops::Deref};

use serde::Deserialize;

/// A scanned or catalogued barcode.
///
/// Barcodes are opaque keys: the bundled catalog uses 13-digit numeric strings,
/// but nothing beyond catalog lookup is validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(from = "String")]
pub struct Barcode(String);

impl Barcode {
    /// Creates a barcode from scanner input, trimming surrounding whitespace.
    pub fn new(value: impl AsRef<str>) -> Self {
        Barcode(value.as_ref().trim().to_string())
    }

    /// Returns the barcode as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` when the barcode has no characters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Deref for Barcode {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Borrow<str> for Barcode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Barcode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Barcode {
    fn from(value: &str) -> Self {
        Barcode::new(value)
    }
}

impl From<String> for Barcode {
    fn from(value: String) -> Self {
        Barcode::new(value)
    }
}

impl fmt::Display for Barcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
