//! # Request Dispatcher
//!
//! Runs one export request end to end:
//!
//! 1. Key check. Nothing else happens on failure.
//! 2. Operation lookup and argument parsing.
//! 3. Connection acquisition.
//! 4. Generator call, with the caller's table checked against the
//!    database's own listing.
//! 5. Connection close, on success and on failure.
//!
//! There are no retries; the first error ends the request.

use std::collections::HashMap;
use std::sync::Arc;

use super::connection::{Connection, ConnectionProvider};
use super::errors::ExportResult;
use super::generators::{data_statement, list_tables, resolve_table, row_count, schema_statements};
use super::registry::{Operation, OperationRequest, OperationResult, RequestDefaults};
use crate::auth::ApiKeyGate;

/// Run a parsed request on an open connection
pub async fn dispatch(
    conn: &mut dyn Connection,
    request: &OperationRequest,
) -> ExportResult<OperationResult> {
    match request.operation {
        Operation::Tables => Ok(OperationResult::List(list_tables(conn).await?)),
        Operation::CreateTables => Ok(OperationResult::List(schema_statements(conn).await?)),
        Operation::InsertInto => {
            let table = resolve_table(conn, &request.table).await?;
            Ok(OperationResult::Text(
                data_statement(conn, &table, &request.limit).await?,
            ))
        }
        Operation::CountRows => {
            let table = resolve_table(conn, &request.table).await?;
            Ok(OperationResult::Count(row_count(conn, &table).await?))
        }
    }
}

/// Gate, provider and defaults for serving requests
#[derive(Clone)]
pub struct Dispatcher {
    gate: ApiKeyGate,
    provider: Arc<dyn ConnectionProvider>,
    defaults: RequestDefaults,
}

impl Dispatcher {
    pub fn new(
        gate: ApiKeyGate,
        provider: Arc<dyn ConnectionProvider>,
        defaults: RequestDefaults,
    ) -> Self {
        Self {
            gate,
            provider,
            defaults,
        }
    }

    /// Serve one request from its query parameters
    pub async fn handle(&self, params: &HashMap<String, String>) -> ExportResult<OperationResult> {
        self.gate.check(params.get("key").map(String::as_str))?;

        let request = OperationRequest::from_params(params, &self.defaults)?;
        self.run(&request).await
    }

    /// Run an already authenticated request on a fresh connection
    pub async fn run(&self, request: &OperationRequest) -> ExportResult<OperationResult> {
        let mut conn = self.provider.connect().await?;
        let outcome = dispatch(conn.as_mut(), request).await;
        conn.close().await;
        outcome
    }
}
