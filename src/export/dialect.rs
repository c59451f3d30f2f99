//! # SQL Dialects
//!
//! Statement text for introspection queries, identifier quoting and
//! string-literal escaping, per database engine.
//!
//! ## Literal convention
//! - Database NULL is the bare keyword `NULL`.
//! - Every other value is single-quoted text, so the string `"NULL"`
//!   becomes `'NULL'`.
//! - Bytes that are not valid UTF-8 become a hex literal `X'..'`.
//! - SQLite cannot parse a NUL inside a quoted literal, so text holding one
//!   becomes `CAST(X'..' AS TEXT)`.

use super::limit::Limit;
use super::value::Value;

/// Database engine a connection speaks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    MySql,
    Sqlite,
}

impl Dialect {
    /// Quote an identifier, doubling any embedded quote character
    pub fn quote_ident(&self, ident: &str) -> String {
        match self {
            Dialect::MySql => format!("`{}`", ident.replace('`', "``")),
            Dialect::Sqlite => format!("\"{}\"", ident.replace('"', "\"\"")),
        }
    }

    /// Escape text for use between single quotes
    pub fn escape(&self, text: &str) -> String {
        match self {
            Dialect::MySql => escape_backslash(text),
            Dialect::Sqlite => escape_quote_doubling(text),
        }
    }

    /// Render a value as an SQL literal
    pub fn literal(&self, value: &Value) -> String {
        match value {
            Value::Null => "NULL".to_string(),
            Value::Bytes(bytes) => match std::str::from_utf8(bytes) {
                Ok(text) => self.text_literal(text),
                Err(_) => format!("X'{}'", hex::encode_upper(bytes)),
            },
            other => self.text_literal(&other.to_text().unwrap_or_default()),
        }
    }

    fn text_literal(&self, text: &str) -> String {
        match self {
            Dialect::Sqlite if text.contains('\0') => {
                format!("CAST(X'{}' AS TEXT)", hex::encode_upper(text))
            }
            _ => format!("'{}'", self.escape(text)),
        }
    }

    /// Query whose first column lists every table
    pub fn list_tables_sql(&self) -> String {
        match self {
            Dialect::MySql => "SHOW TABLES".to_string(),
            Dialect::Sqlite => "SELECT name FROM sqlite_master \
                 WHERE type = 'table' AND name NOT LIKE 'sqlite\\_%' ESCAPE '\\'"
                .to_string(),
        }
    }

    /// Query whose second column holds the table's CREATE statement
    pub fn create_table_sql(&self, table: &str) -> String {
        match self {
            Dialect::MySql => format!("SHOW CREATE TABLE {}", self.quote_ident(table)),
            Dialect::Sqlite => format!(
                "SELECT name, sql FROM sqlite_master WHERE type = 'table' AND name = '{}'",
                self.escape(table)
            ),
        }
    }

    /// Query whose first column lists the table's columns in order
    pub fn columns_sql(&self, table: &str) -> String {
        match self {
            Dialect::MySql => format!("SHOW COLUMNS FROM {}", self.quote_ident(table)),
            Dialect::Sqlite => format!(
                "SELECT name FROM pragma_table_info('{}')",
                self.escape(table)
            ),
        }
    }

    /// Bounded row select
    pub fn select_sql(&self, table: &str, limit: &Limit) -> String {
        format!("SELECT * FROM {} LIMIT {}", self.quote_ident(table), limit)
    }

    /// Row count aggregate
    pub fn count_sql(&self, table: &str) -> String {
        format!("SELECT COUNT(*) AS row_count FROM {}", self.quote_ident(table))
    }
}

/// Backslash escaping of NUL, single quote, double quote and backslash
pub fn escape_backslash(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '\0' => out.push_str("\\0"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            c => out.push(c),
        }
    }
    out
}

/// Standard SQL escaping: single quotes are doubled
pub fn escape_quote_doubling(text: &str) -> String {
    text.replace('\'', "''")
}
