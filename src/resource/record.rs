use crate::traits::Column;
use crate::types::Row;

/// Columns of a `SHOW TABLES` result that a table read maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowTablesColumn {
    Comment,
    Name,
    SchemaName,
    DatabaseName,
}

impl Column for ShowTablesColumn {
    fn column_name(&self) -> &'static str {
        match self {
            ShowTablesColumn::Comment => "comment",
            ShowTablesColumn::Name => "name",
            ShowTablesColumn::SchemaName => "schema_name",
            ShowTablesColumn::DatabaseName => "database_name",
        }
    }

    fn table_name(&self) -> &'static str {
        "tables"
    }
}

/// A table as reported by the warehouse.
///
/// A field is `None` when the column was missing or NULL, and `Some("")`
/// when it came back empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRecord {
    pub comment: Option<String>,
    pub name: Option<String>,
    pub schema_name: Option<String>,
    pub database_name: Option<String>,
}

impl TableRecord {
    /// Scans the mapped columns out of a `SHOW TABLES` row.
    pub fn scan(row: &Row) -> Self {
        Self {
            comment: row.get_opt(&ShowTablesColumn::Comment),
            name: row.get_opt(&ShowTablesColumn::Name),
            schema_name: row.get_opt(&ShowTablesColumn::SchemaName),
            database_name: row.get_opt(&ShowTablesColumn::DatabaseName),
        }
    }
}
