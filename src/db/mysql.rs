//! MySQL connection provider.

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection, MySqlRow};
use sqlx::{Executor, Row, ValueRef};

use super::{closed, collect_rows};
use crate::config::DatabaseConfig;
use crate::export::{
    Connection, ConnectionProvider, Dialect, ExportError, ExportResult, ResultSet, Value,
};

/// Opens MySQL connections from configured credentials
pub struct MySqlProvider {
    options: MySqlConnectOptions,
}

impl MySqlProvider {
    pub fn new(config: &DatabaseConfig) -> Self {
        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.name)
            .charset(&config.charset);

        Self { options }
    }
}

#[async_trait]
impl ConnectionProvider for MySqlProvider {
    async fn connect(&self) -> ExportResult<Box<dyn Connection>> {
        let conn = <MySqlConnection as sqlx::Connection>::connect_with(&self.options)
            .await
            .map_err(ExportError::connection)?;

        Ok(Box::new(MySqlExportConnection { inner: Some(conn) }))
    }
}

struct MySqlExportConnection {
    inner: Option<MySqlConnection>,
}

#[async_trait]
impl Connection for MySqlExportConnection {
    fn dialect(&self) -> Dialect {
        Dialect::MySql
    }

    async fn query(&mut self, sql: &str) -> ExportResult<ResultSet> {
        let conn = self.inner.as_mut().ok_or_else(closed)?;
        // A bare &str runs unprepared, over the text protocol
        let rows = conn.fetch_all(sql).await.map_err(ExportError::query)?;
        collect_rows(&rows, decode)
    }

    async fn close(&mut self) {
        if let Some(conn) = self.inner.take() {
            let _ = sqlx::Connection::close(conn).await;
        }
    }
}

fn decode(row: &MySqlRow, index: usize) -> Result<Value, sqlx::Error> {
    if row.try_get_raw(index)?.is_null() {
        return Ok(Value::Null);
    }

    let bytes: Vec<u8> = row.try_get_unchecked(index)?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => Value::Text(text),
        Err(err) => Value::Bytes(err.into_bytes()),
    })
}
