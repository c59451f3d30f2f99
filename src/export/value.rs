//! Scalar values and result sets returned by a connection.

/// A single database value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Bytes(Vec<u8>),
}

impl Value {
    /// Textual form of the value, `None` for NULL
    ///
    /// Bytes that are not valid UTF-8 are replaced lossily.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::Integer(i) => Some(i.to_string()),
            Value::Real(f) => Some(f.to_string()),
            Value::Text(s) => Some(s.clone()),
            Value::Bytes(b) => Some(String::from_utf8_lossy(b).into_owned()),
        }
    }

    /// Interpret the value as a non-negative count
    pub fn to_count(&self) -> Option<u64> {
        match self {
            Value::Integer(i) => u64::try_from(*i).ok(),
            Value::Text(s) => s.trim().parse().ok(),
            Value::Bytes(b) => std::str::from_utf8(b).ok()?.trim().parse().ok(),
            Value::Null | Value::Real(_) => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

/// Rows returned by one query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    /// Column names, empty when the query returned no rows
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl ResultSet {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self { columns, rows }
    }

    /// Project one column of every row as text, skipping NULLs
    pub fn column_text(&self, index: usize) -> Vec<String> {
        self.rows
            .iter()
            .filter_map(|row| row.get(index).and_then(Value::to_text))
            .collect()
    }

    /// Value at `(row, column)`
    pub fn get(&self, row: usize, column: usize) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(column))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_text() {
        assert_eq!(Value::Null.to_text(), None);
        assert_eq!(Value::Integer(-3).to_text().as_deref(), Some("-3"));
        assert_eq!(Value::Real(1.5).to_text().as_deref(), Some("1.5"));
        assert_eq!(Value::from("NULL").to_text().as_deref(), Some("NULL"));
        assert_eq!(
            Value::Bytes(b"abc".to_vec()).to_text().as_deref(),
            Some("abc")
        );
    }

    #[test]
    fn test_to_count() {
        assert_eq!(Value::Integer(7).to_count(), Some(7));
        assert_eq!(Value::from("12").to_count(), Some(12));
        assert_eq!(Value::Bytes(b"5".to_vec()).to_count(), Some(5));
        assert_eq!(Value::Integer(-1).to_count(), None);
        assert_eq!(Value::Null.to_count(), None);
        assert_eq!(Value::from("seven").to_count(), None);
    }

    #[test]
    fn test_column_projection() {
        let set = ResultSet::new(
            vec!["Tables_in_db".to_string(), "Table_type".to_string()],
            vec![
                vec![Value::from("wp_posts"), Value::from("BASE TABLE")],
                vec![Value::from("wp_users"), Value::from("BASE TABLE")],
            ],
        );
        assert_eq!(set.column_text(0), vec!["wp_posts", "wp_users"]);
        assert_eq!(set.get(1, 1), Some(&Value::from("BASE TABLE")));
        assert_eq!(set.get(2, 0), None);
    }
}
