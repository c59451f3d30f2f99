//! # Export Engine
//!
//! Turns a named operation into SQL text extracted from a live database:
//! table listing, CREATE statements, paginated INSERT statements and row
//! counts.
//!
//! The engine does not log; that is left to the transport in front of it.

pub mod connection;
pub mod dialect;
pub mod dispatcher;
pub mod errors;
pub mod generators;
pub mod limit;
pub mod registry;
pub mod value;

pub use connection::{Connection, ConnectionProvider};
pub use dialect::Dialect;
pub use dispatcher::{dispatch, Dispatcher};
pub use errors::{ErrorResponse, ExportError, ExportResult};
pub use generators::{data_statement, list_tables, resolve_table, row_count, schema_statements};
pub use limit::Limit;
pub use registry::{Operation, OperationRequest, OperationResult, RequestDefaults};
pub use value::{ResultSet, Value};
