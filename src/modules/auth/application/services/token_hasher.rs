use sha2::{Digest, Sha256};

/// Hash a token (or one-time code) using SHA-256 for storage.
/// Raw values are never persisted.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
