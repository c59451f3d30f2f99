//! # Connection Interface
//!
//! What the export engine needs from a database: run a query, report its
//! dialect, close. Generators receive the connection explicitly; nothing
//! holds a process-wide handle.

use async_trait::async_trait;

use super::dialect::Dialect;
use super::errors::ExportResult;
use super::value::ResultSet;

/// A live, request-scoped database connection
#[async_trait]
pub trait Connection: Send {
    /// SQL dialect spoken by this connection
    fn dialect(&self) -> Dialect;

    /// Run one statement and collect its rows
    async fn query(&mut self, sql: &str) -> ExportResult<ResultSet>;

    /// Close the connection
    ///
    /// Dropping a connection also releases it; closing lets the server
    /// side finish the session cleanly. Queries after close fail.
    async fn close(&mut self);
}

/// Opens connections
#[async_trait]
pub trait ConnectionProvider: Send + Sync {
    /// Open a new connection, failing closed on any error
    async fn connect(&self) -> ExportResult<Box<dyn Connection>>;
}
