//! # Cryptographic Utilities
//!
//! Key hashing, key generation and constant-time comparison.
//!
//! Keys are never stored: configuration only carries the SHA-256 hex digest,
//! the same value `echo -n KEY | sha256sum` prints.

use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;
use rand::Rng;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Default length of generated API keys
pub const DEFAULT_KEY_LENGTH: usize = 50;

/// SHA-256 digest of a key, as raw bytes
pub fn sha256(key: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    hasher.finalize().into()
}

/// SHA-256 digest of a key, as lowercase hex
pub fn sha256_hex(key: &str) -> String {
    hex::encode(sha256(key))
}

/// Decode a configured hex digest into bytes
///
/// Returns `None` unless the input is exactly 32 bytes of hex.
pub fn decode_digest(hash: &str) -> Option<[u8; 32]> {
    let bytes = hex::decode(hash.trim()).ok()?;
    bytes.try_into().ok()
}

/// Generate a random alphanumeric API key
pub fn generate_api_key(length: usize) -> String {
    OsRng
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Constant-time comparison of two byte slices
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}
