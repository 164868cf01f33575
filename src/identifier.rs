//! Stable identifiers for naming rendered output.
//!
//! An identifier is `<algorithm>.<hex sha-256>` of the compact JSON encoding
//! of the render parameters. It only names files; nothing in the geometry
//! depends on it.

use std::fmt;

use serde::Serialize;
use sha2::{Digest, Sha256};

/// The parameters that determine a rendered image, in serialization order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SerialParameters {
    pub offset: f64,
    pub iterations: u32,
    pub radius: i32,
    pub minimize: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(algorithm: &str, parameters: &SerialParameters) -> Self {
        // Serializing plain numbers and booleans cannot fail; the fallback
        // only keeps this function total.
        let json = serde_json::to_string(parameters).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(json.as_bytes());
        Self(format!("{}.{}", algorithm, hex::encode(hasher.finalize())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name for this identifier with the given extension.
    pub fn file_name(&self, extension: &str) -> String {
        format!("{}.{}", self.0, extension)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
