//! Content hashing for compiled artifacts.
//!
//! The hash key is a pure function of the bytes persisted to the publish
//! directory: same bytes, same key, regardless of host, path, or time. The
//! hosting platform uses it for cache invalidation and versioning.

use sha2::{Digest, Sha256};

/// SHA-256 hex digest of the given bytes.
pub fn from_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// SHA-256 hex digest of a string's UTF-8 bytes.
pub fn from_string(content: &str) -> String {
    from_bytes(content.as_bytes())
}
