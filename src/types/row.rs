use std::collections::HashMap;

use crate::{
    error::{Result, WhTableError},
    Column,
};

/// Driver-agnostic raw result from a database query.
/// All values are converted to text by the driver; SQL NULL is `None`.
#[derive(Debug, Clone)]
pub struct RawQueryResult {
    /// Column names in order
    pub columns: Vec<String>,
    /// Rows, where each row is a vector of values in column order
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawQueryResult {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        Self { columns, rows }
    }

    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }
}

/// A single row result from a query.
/// Values are accessed by column name.
#[derive(Debug, Clone)]
pub struct Row {
    values: HashMap<String, Option<String>>,
}

impl Row {
    /// Creates a new Row from column names and values.
    pub(crate) fn new(columns: &[String], values: Vec<Option<String>>) -> Self {
        let values = columns
            .iter()
            .zip(values)
            .map(|(col, val)| (col.clone(), val))
            .collect();
        Self { values }
    }

    /// Gets a value by column name.
    ///
    /// A column missing from the row is an error; a NULL value is `Ok(None)`.
    pub fn get<T: Column + ?Sized>(&self, column: &T) -> Result<Option<&str>> {
        self.values
            .get(column.column_name())
            .map(|v| v.as_deref())
            .ok_or_else(|| WhTableError::ColumnNotFound(column.qualified_name()))
    }

    /// Gets a value by column name, treating a missing column like NULL.
    pub fn get_opt<T: Column + ?Sized>(&self, column: &T) -> Option<String> {
        self.get(column).ok().flatten().map(str::to_string)
    }
}

/// Result of a query execution, containing zero or more rows.
#[derive(Debug)]
pub struct QueryResult {
    rows: Vec<Row>,
}

impl QueryResult {
    /// Creates a QueryResult from a RawQueryResult.
    pub fn from_raw(raw: RawQueryResult) -> Self {
        let rows = raw
            .rows
            .into_iter()
            .map(|values| Row::new(&raw.columns, values))
            .collect();
        Self { rows }
    }

    /// Returns the first row, if any, discarding the rest.
    pub fn first_row(self) -> Option<Row> {
        self.rows.into_iter().next()
    }

    /// Returns true if this result contains no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
