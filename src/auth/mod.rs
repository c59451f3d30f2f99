//! # Auth Module
//!
//! Shared-secret authentication for the export endpoint.
//!
//! Callers present a plaintext key; the server only knows its SHA-256
//! digest and compares digests in constant time.

pub mod crypto;
pub mod errors;
pub mod gate;

pub use errors::{AuthError, AuthResult};
pub use gate::{authenticate, ApiKeyGate};
