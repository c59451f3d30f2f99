//! # Database Backends
//!
//! `sqlx` implementations of the export connection interface.
//!
//! - [`MySqlProvider`]: one `MySqlConnection` per request, charset set at
//!   connect time. Statements go over the text protocol, so every value
//!   arrives as text.
//! - [`SqliteProvider`]: a read-only connection to a database file.

mod mysql;
mod sqlite;

pub use mysql::MySqlProvider;
pub use sqlite::SqliteProvider;

use std::sync::Arc;

use sqlx::{Column, Row};

use crate::config::{DatabaseConfig, Engine};
use crate::export::{ConnectionProvider, ExportError, ExportResult, ResultSet, Value};

/// Build the provider selected by configuration
pub fn provider(config: &DatabaseConfig) -> Arc<dyn ConnectionProvider> {
    match config.engine {
        Engine::MySql => Arc::new(MySqlProvider::new(config)),
        Engine::Sqlite => Arc::new(SqliteProvider::new(&config.name)),
    }
}

/// Convert driver rows into a result set
fn collect_rows<R: Row>(
    rows: &[R],
    decode: fn(&R, usize) -> Result<Value, sqlx::Error>,
) -> ExportResult<ResultSet> {
    let columns = rows
        .first()
        .map(|row| {
            row.columns()
                .iter()
                .map(|column| column.name().to_string())
                .collect()
        })
        .unwrap_or_default();

    let values = rows
        .iter()
        .map(|row| (0..row.len()).map(|index| decode(row, index)).collect())
        .collect::<Result<Vec<Vec<Value>>, sqlx::Error>>()
        .map_err(ExportError::query)?;

    Ok(ResultSet::new(columns, values))
}

fn closed() -> ExportError {
    ExportError::QueryFailure("connection already closed".to_string())
}
