//! # Operation Registry
//!
//! The closed set of operations the endpoint serves, the request that
//! selects one, and the result it produces.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use super::errors::{ExportError, ExportResult};
use super::limit::Limit;

/// Table used when a request names none
pub const DEFAULT_TABLE: &str = "wp_posts";

/// Registered operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `tables`: list table names
    Tables,
    /// `create_tables`: one CREATE statement per table
    CreateTables,
    /// `insert_into`: INSERT statement for a window of rows
    InsertInto,
    /// `count_rows`: number of rows in a table
    CountRows,
}

impl Operation {
    /// Every registered operation
    pub const ALL: [Operation; 4] = [
        Operation::Tables,
        Operation::CreateTables,
        Operation::InsertInto,
        Operation::CountRows,
    ];

    /// Name used in the `function` request parameter
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Tables => "tables",
            Operation::CreateTables => "create_tables",
            Operation::InsertInto => "insert_into",
            Operation::CountRows => "count_rows",
        }
    }

    /// Look up an operation by its exact name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.name() == name)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Fallbacks for arguments a request leaves out
#[derive(Debug, Clone)]
pub struct RequestDefaults {
    pub table: String,
    pub limit: Limit,
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self {
            table: DEFAULT_TABLE.to_string(),
            limit: Limit::default(),
        }
    }
}

/// A parsed export request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationRequest {
    pub operation: Operation,
    /// Requested table, not yet checked against the database
    pub table: String,
    pub limit: Limit,
}

impl OperationRequest {
    /// Build a request for `operation` with default arguments
    pub fn new(operation: Operation, defaults: &RequestDefaults) -> Self {
        Self {
            operation,
            table: defaults.table.clone(),
            limit: defaults.limit,
        }
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    pub fn with_limit(mut self, limit: Limit) -> Self {
        self.limit = limit;
        self
    }

    /// Parse `function`, `table` and `limit` from query parameters
    ///
    /// Other parameters, `key` included, are ignored.
    pub fn from_params(
        params: &HashMap<String, String>,
        defaults: &RequestDefaults,
    ) -> ExportResult<Self> {
        let name = params
            .get("function")
            .ok_or_else(|| ExportError::UnknownOperation("missing 'function' parameter".to_string()))?;
        let operation = Operation::from_name(name)
            .ok_or_else(|| ExportError::UnknownOperation(name.clone()))?;

        let mut request = Self::new(operation, defaults);
        if let Some(table) = params.get("table") {
            request.table = table.clone();
        }
        if let Some(limit) = params.get("limit") {
            request.limit = limit.parse()?;
        }
        Ok(request)
    }
}

/// Result of one operation
///
/// Serializes to a JSON array of strings, a JSON string or a JSON number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OperationResult {
    /// Table names or CREATE statements
    List(Vec<String>),
    /// An INSERT statement block
    Text(String),
    /// A row count
    Count(u64),
}

impl OperationResult {
    /// Encode the result as a JSON body
    pub fn to_json(&self) -> ExportResult<Vec<u8>> {
        serde_json::to_vec(self)
            .map_err(|e| ExportError::QueryFailure(format!("failed to encode result: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::limit::DEFAULT_LIMIT;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_registry_names_round_trip() {
        for op in Operation::ALL {
            assert_eq!(Operation::from_name(op.name()), Some(op));
        }
        assert_eq!(Operation::from_name("TABLES"), None);
        assert_eq!(Operation::from_name("drop_tables"), None);
        assert_eq!(Operation::from_name(""), None);
    }

    #[test]
    fn test_from_params_applies_defaults() {
        let request = OperationRequest::from_params(
            &params(&[("key", "k"), ("function", "insert_into")]),
            &RequestDefaults::default(),
        )
        .unwrap();
        assert_eq!(request.operation, Operation::InsertInto);
        assert_eq!(request.table, DEFAULT_TABLE);
        assert_eq!(request.limit, Limit::new(0, 100));
        assert_eq!(DEFAULT_LIMIT, "0, 100");
    }

    #[test]
    fn test_from_params_reads_arguments() {
        let request = OperationRequest::from_params(
            &params(&[
                ("function", "insert_into"),
                ("table", "wp_users"),
                ("limit", "200, 50"),
                ("unrelated", "ignored"),
            ]),
            &RequestDefaults::default(),
        )
        .unwrap();
        assert_eq!(request.table, "wp_users");
        assert_eq!(request.limit, Limit::new(200, 50));
    }

    #[test]
    fn test_missing_function_is_unknown_operation() {
        let err = OperationRequest::from_params(&params(&[("key", "k")]), &RequestDefaults::default())
            .unwrap_err();
        assert!(matches!(err, ExportError::UnknownOperation(_)));
    }

    #[test]
    fn test_unregistered_function_is_unknown_operation() {
        let err = OperationRequest::from_params(
            &params(&[("function", "drop_database")]),
            &RequestDefaults::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ExportError::UnknownOperation(ref name) if name == "drop_database"));
    }

    #[test]
    fn test_bad_limit_is_invalid_argument() {
        let err = OperationRequest::from_params(
            &params(&[("function", "insert_into"), ("limit", "0, 1; DELETE FROM t")]),
            &RequestDefaults::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ExportError::InvalidArgument(_)));
    }

    #[test]
    fn test_result_json_shapes() {
        let list = OperationResult::List(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(list.to_json().unwrap(), br#"["a","b"]"#.to_vec());

        let text = OperationResult::Text("INSERT INTO `t` (`a`) VALUES\n('x');".to_string());
        assert_eq!(
            String::from_utf8(text.to_json().unwrap()).unwrap(),
            r#""INSERT INTO `t` (`a`) VALUES\n('x');""#
        );

        assert_eq!(OperationResult::Count(7).to_json().unwrap(), b"7".to_vec());
    }
}
