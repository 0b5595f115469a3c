//! Content digests for the run report

use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 of `content`.
pub fn sha256_hex(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{:x}", hasher.finalize())
}
