//! Cryptographic utility functions

use sha2::{Digest, Sha256};

/// Compute SHA-256 hash and return as hex string
pub fn sha256_hex(data: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data.as_bytes());
    hex::encode(hasher.finalize())
}
