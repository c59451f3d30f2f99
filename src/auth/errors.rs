//! # Auth Errors
//!
//! Error types for the API key gate.

use thiserror::Error;

/// Result type for auth operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication errors
///
/// Every variant is reported to callers the same way (401, empty body),
/// so the messages only matter for logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No `key` parameter on the request
    #[error("API key missing")]
    MissingKey,

    /// Key supplied but its hash does not match
    #[error("Invalid API key")]
    InvalidKey,

    /// The configured hash is not a SHA-256 hex digest
    #[error("Configured API key hash is malformed")]
    MalformedHash,
}

impl AuthError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        401
    }

    /// Short machine-readable code used in log lines
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingKey => "missing_key",
            AuthError::InvalidKey => "invalid_key",
            AuthError::MalformedHash => "malformed_hash",
        }
    }
}
