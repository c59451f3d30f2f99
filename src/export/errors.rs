//! # Export Errors
//!
//! Error taxonomy of the export endpoint and its HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::auth::AuthError;

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;

/// Export errors
///
/// Every error is terminal for the request that raised it.
#[derive(Debug, Clone, Error)]
pub enum ExportError {
    /// Missing or mismatching key
    #[error("{0}")]
    Unauthorized(#[from] AuthError),

    /// Database unreachable or charset negotiation failed
    #[error("Connection failed: {0}")]
    ConnectionFailure(String),

    /// `function` absent or not a registered operation
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    /// Malformed request argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A query failed, or named a table the database does not list
    #[error("Query failed: {0}")]
    QueryFailure(String),
}

impl ExportError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ExportError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ExportError::UnknownOperation(_) => StatusCode::BAD_REQUEST,
            ExportError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            ExportError::ConnectionFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ExportError::QueryFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short machine-readable code used in log lines
    pub fn code(&self) -> &'static str {
        match self {
            ExportError::Unauthorized(_) => "unauthorized",
            ExportError::ConnectionFailure(_) => "connection_failure",
            ExportError::UnknownOperation(_) => "unknown_operation",
            ExportError::InvalidArgument(_) => "invalid_argument",
            ExportError::QueryFailure(_) => "query_failure",
        }
    }

    pub(crate) fn query(err: impl std::fmt::Display) -> Self {
        ExportError::QueryFailure(err.to_string())
    }

    pub(crate) fn connection(err: impl std::fmt::Display) -> Self {
        ExportError::ConnectionFailure(err.to_string())
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl From<ExportError> for ErrorResponse {
    fn from(err: ExportError) -> Self {
        Self {
            code: err.status_code().as_u16(),
            error: err.to_string(),
        }
    }
}

impl IntoResponse for ExportError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            // No body at all for rejected keys
            ExportError::Unauthorized(_) => status.into_response(),
            other => (status, Json(ErrorResponse::from(other))).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ExportError::from(AuthError::InvalidKey).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ExportError::UnknownOperation("drop".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ExportError::InvalidArgument("limit".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ExportError::ConnectionFailure("refused".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ExportError::QueryFailure("syntax".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_response_body() {
        let body = ErrorResponse::from(ExportError::UnknownOperation("drop".to_string()));
        assert_eq!(body.code, 400);
        assert_eq!(body.error, "Unknown operation: drop");
    }

    #[test]
    fn test_codes_are_distinct() {
        let errors = [
            ExportError::from(AuthError::MissingKey),
            ExportError::ConnectionFailure(String::new()),
            ExportError::UnknownOperation(String::new()),
            ExportError::InvalidArgument(String::new()),
            ExportError::QueryFailure(String::new()),
        ];
        let mut codes: Vec<_> = errors.iter().map(|e| e.code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }
}
