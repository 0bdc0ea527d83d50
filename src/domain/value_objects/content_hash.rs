//! Content Hash Value Object
//!
//! SHA-256 of a file's raw bytes. The watch loop uses it to drop change
//! notifications for saves that did not alter the content.

use std::fmt;

/// Content hash value object (`sha256:<hex>`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash(String);

impl ContentHash {
    /// Prefix for SHA-256 hashes
    pub const PREFIX: &'static str = "sha256:";

    /// Compute SHA-256 of raw bytes
    pub fn from_bytes(bytes: &[u8]) -> Self {
        use sha2::{Digest, Sha256};
        let hash = Sha256::digest(bytes);
        Self(format!("{}{:x}", Self::PREFIX, hash))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Hex part without prefix
    pub fn hex(&self) -> &str {
        self.0.strip_prefix(Self::PREFIX).unwrap_or(&self.0)
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_has_prefix_and_hex() {
        let hash = ContentHash::from_bytes(b"@color: red;");
        assert!(hash.as_str().starts_with("sha256:"));
        assert_eq!(hash.hex().len(), 64);
    }

    #[test]
    fn equal_content_equal_hash() {
        assert_eq!(
            ContentHash::from_bytes(b"a { color: red }"),
            ContentHash::from_bytes(b"a { color: red }")
        );
        assert_ne!(
            ContentHash::from_bytes(b"a { color: red }"),
            ContentHash::from_bytes(b"a { color: blue }")
        );
    }
}
