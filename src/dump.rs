//! # Local Dump
//!
//! Writes a database's schema and rows to a directory using the export
//! generators directly, without going through HTTP:
//!
//! - `tables.sql`: every CREATE statement, separated by blank lines
//! - `data/<table>.sql`: INSERT statements for the table, `chunk` rows
//!   each, windows computed from the table's row count
//!
//! Data file names are sanitized table names. When two tables sanitize to
//! the same name (compared case-insensitively), later ones get a `_2`,
//! `_3`, ... suffix, so every table has its own file.
//!
//! Output is plain SQL; there is no compression and no restore step.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::export::{
    data_statement, list_tables, row_count, schema_statements, Connection, ConnectionProvider,
    ExportError, Limit,
};
use crate::observability::{log_event_with_fields, Event};

/// Default rows per INSERT statement
pub const DEFAULT_CHUNK: u64 = 1000;

/// Subdirectory holding one INSERT file per table
pub const DATA_DIR: &str = "data";

/// Dump errors
#[derive(Debug, Error)]
pub enum DumpError {
    #[error("{0}")]
    Export(#[from] ExportError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("chunk size must be > 0")]
    ZeroChunk,
}

/// Result type for dumps
pub type DumpResult<T> = Result<T, DumpError>;

/// What a dump wrote
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DumpSummary {
    pub tables: usize,
    pub rows: u64,
    pub files: Vec<PathBuf>,
}

/// Dump every table reachable through `provider` into `target`
///
/// `target` is created if needed. One connection is used for the whole
/// run and closed before returning.
pub async fn dump_database(
    provider: &dyn ConnectionProvider,
    target: &Path,
    chunk: u64,
) -> DumpResult<DumpSummary> {
    if chunk == 0 {
        return Err(DumpError::ZeroChunk);
    }
    fs::create_dir_all(target)?;

    let target_str = target.display().to_string();
    log_event_with_fields(Event::DumpBegin, &[("target", target_str.as_str())]);

    let mut conn = provider.connect().await?;
    let outcome = write_dump(conn.as_mut(), target, chunk).await;
    conn.close().await;
    let summary = outcome?;

    let tables = summary.tables.to_string();
    let rows = summary.rows.to_string();
    log_event_with_fields(
        Event::DumpComplete,
        &[
            ("target", target_str.as_str()),
            ("tables", tables.as_str()),
            ("rows", rows.as_str()),
        ],
    );
    Ok(summary)
}

async fn write_dump(
    conn: &mut dyn Connection,
    target: &Path,
    chunk: u64,
) -> DumpResult<DumpSummary> {
    let mut summary = DumpSummary::default();

    let schema = schema_statements(conn).await?;
    let schema_path = target.join("tables.sql");
    fs::write(&schema_path, schema.join("\n\n"))?;
    summary.files.push(schema_path);

    let data_dir = target.join(DATA_DIR);
    fs::create_dir_all(&data_dir)?;
    let mut taken = HashSet::new();

    for table in list_tables(conn).await? {
        let total = row_count(conn, &table).await?;

        let mut statements = Vec::new();
        for limit in Limit::pages(total, chunk) {
            statements.push(data_statement(conn, &table, &limit).await?);
        }

        let path = data_dir.join(format!("{}.sql", unique_stem(&table, &mut taken)));
        fs::write(&path, statements.join("\n\n"))?;

        let rows = total.to_string();
        log_event_with_fields(
            Event::DumpTableWritten,
            &[("table", table.as_str()), ("rows", rows.as_str())],
        );

        summary.tables += 1;
        summary.rows += total;
        summary.files.push(path);
    }

    Ok(summary)
}

/// File name for a table, with anything outside `[A-Za-z0-9_.-]` replaced
fn file_stem(table: &str) -> String {
    let stem: String = table
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();

    match stem.trim_matches('.') {
        "" => "_".to_string(),
        _ => stem,
    }
}

/// `file_stem`, suffixed until it is not in `taken`
fn unique_stem(table: &str, taken: &mut HashSet<String>) -> String {
    let base = file_stem(table);
    let mut stem = base.clone();
    let mut n = 2;
    while !taken.insert(stem.to_lowercase()) {
        stem = format!("{}_{}", base, n);
        n += 1;
    }
    stem
}
