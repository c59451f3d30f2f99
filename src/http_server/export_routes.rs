//! Export HTTP Routes
//!
//! The key-gated export endpoint. Everything is carried in the query
//! string: `key`, `function`, and the optional `table` and `limit`.
//!
//! Status convention: 200 with a JSON body on success, 401 with an empty
//! body for a rejected key, 400 for an unknown operation or malformed
//! argument, 500 when the database fails.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

use crate::export::{Dispatcher, ExportError};
use crate::observability::{log_event_with_fields, Event};

// ==================
// Shared State
// ==================

/// Export state shared across handlers
pub struct ExportState {
    pub dispatcher: Dispatcher,
}

impl ExportState {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }
}

// ==================
// Export Routes
// ==================

/// Create export routes
pub fn export_routes(state: Arc<ExportState>) -> Router {
    Router::new()
        .route("/", get(export_handler).post(export_handler))
        .route("/export", get(export_handler).post(export_handler))
        .with_state(state)
}

// ==================
// Handlers
// ==================

async fn export_handler(
    State(state): State<Arc<ExportState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, ExportError> {
    let started = Instant::now();
    let operation = params.get("function").map(String::as_str).unwrap_or("");

    // Encode before answering so a failure never leaves a partial body
    let outcome = state
        .dispatcher
        .handle(&params)
        .await
        .and_then(|result| result.to_json());

    match outcome {
        Ok(body) => {
            let elapsed_ms = started.elapsed().as_millis().to_string();
            let bytes = body.len().to_string();
            log_event_with_fields(
                Event::ExportComplete,
                &[
                    ("operation", operation),
                    ("duration_ms", elapsed_ms.as_str()),
                    ("bytes", bytes.as_str()),
                ],
            );
            Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
        }
        Err(ExportError::Unauthorized(reason)) => {
            log_event_with_fields(Event::RequestRejected, &[("reason", reason.code())]);
            Err(ExportError::Unauthorized(reason))
        }
        Err(err) => {
            let message = err.to_string();
            log_event_with_fields(
                Event::ExportFailed,
                &[
                    ("operation", operation),
                    ("code", err.code()),
                    ("error", message.as_str()),
                ],
            );
            Err(err)
        }
    }
}
