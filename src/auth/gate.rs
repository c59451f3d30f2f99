//! # API Key Gate
//!
//! Verifies the caller-supplied key before anything else runs.
//!
//! ## Invariants
//! - The gate is fail-closed: a missing key, a wrong key and a malformed
//!   configured hash are all rejections.
//! - Digests are compared in constant time.

use super::crypto::{constant_time_eq, decode_digest, sha256};
use super::errors::{AuthError, AuthResult};

/// Check a supplied key against an expected SHA-256 hex digest
pub fn authenticate(supplied_key: &str, expected_hash: &str) -> bool {
    match decode_digest(expected_hash) {
        Some(expected) => constant_time_eq(&sha256(supplied_key), &expected),
        None => false,
    }
}

/// Shared-secret gate built from configuration
#[derive(Clone)]
pub struct ApiKeyGate {
    expected: Option<[u8; 32]>,
}

impl ApiKeyGate {
    /// Create a gate from the configured hex digest
    ///
    /// A malformed digest yields a gate that rejects every request.
    pub fn new(expected_hash: &str) -> Self {
        Self {
            expected: decode_digest(expected_hash),
        }
    }

    /// Whether the configured digest is usable
    pub fn is_configured(&self) -> bool {
        self.expected.is_some()
    }

    /// Verify a request's key
    pub fn check(&self, supplied_key: Option<&str>) -> AuthResult<()> {
        let expected = self.expected.as_ref().ok_or(AuthError::MalformedHash)?;
        let key = supplied_key.ok_or(AuthError::MissingKey)?;

        if constant_time_eq(&sha256(key), expected) {
            Ok(())
        } else {
            Err(AuthError::InvalidKey)
        }
    }
}

impl std::fmt::Debug for ApiKeyGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyGate")
            .field("configured", &self.is_configured())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::crypto::sha256_hex;

    #[test]
    fn test_authenticate_accepts_matching_key() {
        let hash = sha256_hex("s3cret-key");
        assert!(authenticate("s3cret-key", &hash));
        assert!(authenticate("s3cret-key", &hash.to_uppercase()));
    }

    #[test]
    fn test_authenticate_rejects_other_keys() {
        let hash = sha256_hex("s3cret-key");
        for key in ["", "s3cret-key ", "S3CRET-KEY", "s3cret", hash.as_str()] {
            assert!(!authenticate(key, &hash), "accepted {:?}", key);
        }
    }

    #[test]
    fn test_authenticate_rejects_placeholder_hash() {
        assert!(!authenticate("anything", "SHA256_OF_APIKEY"));
        assert!(!authenticate("", ""));
    }

    #[test]
    fn test_gate_check() {
        let gate = ApiKeyGate::new(&sha256_hex("k"));
        assert!(gate.is_configured());
        assert_eq!(gate.check(Some("k")), Ok(()));
        assert_eq!(gate.check(Some("x")), Err(AuthError::InvalidKey));
        assert_eq!(gate.check(None), Err(AuthError::MissingKey));
    }

    #[test]
    fn test_unconfigured_gate_rejects_everything() {
        let gate = ApiKeyGate::new("not-a-digest");
        assert!(!gate.is_configured());
        assert_eq!(gate.check(Some("k")), Err(AuthError::MalformedHash));
        assert_eq!(gate.check(None), Err(AuthError::MalformedHash));
    }

    #[test]
    fn test_debug_does_not_print_digest() {
        let hash = sha256_hex("k");
        let gate = ApiKeyGate::new(&hash);
        assert!(!format!("{:?}", gate).contains(&hash));
    }
}
