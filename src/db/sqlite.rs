//! SQLite connection provider.

use std::path::Path;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteRow};
use sqlx::{Executor, Row, TypeInfo, ValueRef};

use super::{closed, collect_rows};
use crate::export::{
    Connection, ConnectionProvider, Dialect, ExportError, ExportResult, ResultSet, Value,
};

/// Opens read-only connections to a SQLite database file
pub struct SqliteProvider {
    options: SqliteConnectOptions,
}

impl SqliteProvider {
    /// The file must already exist
    pub fn new(path: impl AsRef<Path>) -> Self {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true);

        Self { options }
    }
}

#[async_trait]
impl ConnectionProvider for SqliteProvider {
    async fn connect(&self) -> ExportResult<Box<dyn Connection>> {
        let conn = <SqliteConnection as sqlx::Connection>::connect_with(&self.options)
            .await
            .map_err(ExportError::connection)?;

        Ok(Box::new(SqliteExportConnection { inner: Some(conn) }))
    }
}

struct SqliteExportConnection {
    inner: Option<SqliteConnection>,
}

#[async_trait]
impl Connection for SqliteExportConnection {
    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    async fn query(&mut self, sql: &str) -> ExportResult<ResultSet> {
        let conn = self.inner.as_mut().ok_or_else(closed)?;
        let rows = conn.fetch_all(sql).await.map_err(ExportError::query)?;
        collect_rows(&rows, decode)
    }

    async fn close(&mut self) {
        if let Some(conn) = self.inner.take() {
            let _ = sqlx::Connection::close(conn).await;
        }
    }
}

/// Decode by the value's storage class, not the column's declared type
fn decode(row: &SqliteRow, index: usize) -> Result<Value, sqlx::Error> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(Value::Null);
    }

    let value = match raw.type_info().name() {
        "INTEGER" => Value::Integer(row.try_get_unchecked(index)?),
        "REAL" => Value::Real(row.try_get_unchecked(index)?),
        "BLOB" => Value::Bytes(row.try_get_unchecked(index)?),
        _ => Value::Text(row.try_get_unchecked(index)?),
    };
    Ok(value)
}
