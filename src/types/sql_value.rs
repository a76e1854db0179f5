/// A value rendered inline into statement text.
///
/// The warehouse DDL statements accept no bind parameters, so literals are
/// written into the SQL and must be escaped here.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(String),
}

impl SqlValue {
    /// Returns the SQL literal form, doubling embedded single quotes.
    pub fn to_sql_literal(&self) -> String {
        match self {
            SqlValue::Text(s) => format!("'{}'", s.replace('\'', "''")),
        }
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}
