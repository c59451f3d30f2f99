//! # Statement Generators
//!
//! One function per export artifact. Each takes the request's connection
//! explicitly and issues its queries sequentially on it.
//!
//! Table names reach SQL text as identifiers, which cannot be bound as
//! parameters. Callers pass names obtained from [`list_tables`], or run a
//! caller-supplied name through [`resolve_table`] first.

use super::connection::Connection;
use super::errors::{ExportError, ExportResult};
use super::limit::Limit;
use super::value::Value;

/// Names of all tables, in the order the engine lists them
pub async fn list_tables(conn: &mut dyn Connection) -> ExportResult<Vec<String>> {
    let sql = conn.dialect().list_tables_sql();
    let tables = conn.query(&sql).await?;
    Ok(tables.column_text(0))
}

/// Map a caller-supplied table name to the identical listed name
///
/// Anything that is not an exact match, including names carrying SQL
/// metacharacters, is rejected before it can appear in a statement.
pub async fn resolve_table(conn: &mut dyn Connection, requested: &str) -> ExportResult<String> {
    list_tables(conn)
        .await?
        .into_iter()
        .find(|table| table == requested)
        .ok_or_else(|| ExportError::QueryFailure(format!("table not found: {}", requested)))
}

/// One CREATE statement per table, each terminated by a single `;`
pub async fn schema_statements(conn: &mut dyn Connection) -> ExportResult<Vec<String>> {
    let tables = list_tables(conn).await?;
    let mut statements = Vec::with_capacity(tables.len());

    for table in &tables {
        let sql = conn.dialect().create_table_sql(table);
        let described = conn.query(&sql).await?;
        let create = described
            .get(0, 1)
            .and_then(Value::to_text)
            .ok_or_else(|| {
                ExportError::QueryFailure(format!("no CREATE statement for table {}", table))
            })?;
        statements.push(terminate(&create));
    }

    Ok(statements)
}

/// A multi-row INSERT holding the rows inside `limit`
///
/// When the select fails or the window is empty, the statement keeps its
/// table and column list but has an empty `()` value list, so the result
/// is not always executable SQL.
pub async fn data_statement(
    conn: &mut dyn Connection,
    table: &str,
    limit: &Limit,
) -> ExportResult<String> {
    let dialect = conn.dialect();

    let columns = conn.query(&dialect.columns_sql(table)).await?.column_text(0);
    let column_list = columns
        .iter()
        .map(|column| dialect.quote_ident(column))
        .collect::<Vec<_>>()
        .join(", ");
    let head = format!(
        "INSERT INTO {} ({}) VALUES\n",
        dialect.quote_ident(table),
        column_list
    );

    let rows = match conn.query(&dialect.select_sql(table, limit)).await {
        Ok(selected) => selected.rows,
        Err(_) => Vec::new(),
    };
    if rows.is_empty() {
        return Ok(format!("{}();", head));
    }

    let tuples = rows
        .iter()
        .map(|row| {
            let values = row
                .iter()
                .map(|value| dialect.literal(value))
                .collect::<Vec<_>>()
                .join(", ");
            format!("({})", values)
        })
        .collect::<Vec<_>>()
        .join(",\n");

    Ok(format!("{}{};", head, tuples))
}

/// Number of rows in a table
pub async fn row_count(conn: &mut dyn Connection, table: &str) -> ExportResult<u64> {
    let sql = conn.dialect().count_sql(table);
    let counted = conn.query(&sql).await?;
    counted
        .get(0, 0)
        .and_then(Value::to_count)
        .ok_or_else(|| ExportError::QueryFailure(format!("COUNT(*) on {} returned no count", table)))
}

fn terminate(statement: &str) -> String {
    format!("{};", statement.trim_end().trim_end_matches(';').trim_end())
}
