use thiserror::Error;

use crate::resource::TableChange;

/// Error type for whtable operations
#[derive(Debug, Error)]
pub enum WhTableError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("ID {0} is invalid")]
    InvalidId(String),

    #[error("Table has no ID; it has not been created")]
    MissingId,

    #[error("Invalid {field} identifier {value:?}: {reason}")]
    InvalidIdentifier {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Table {id} does not exist")]
    NotFound { id: String },

    #[error("Changing {field} requires replacing the table")]
    RequiresReplacement { field: &'static str },

    #[error("error {op} table {target}: {source}")]
    Operation {
        op: &'static str,
        target: String,
        #[source]
        source: Box<WhTableError>,
    },

    #[error("error updating table {id}: {failed} failed after applying {applied:?}: {source}")]
    PartialUpdate {
        id: String,
        applied: Vec<TableChange>,
        failed: TableChange,
        #[source]
        source: Box<WhTableError>,
    },
}

impl WhTableError {
    /// Wraps an error with the operation and table it happened on.
    pub fn operation(op: &'static str, target: impl Into<String>, source: WhTableError) -> Self {
        WhTableError::Operation {
            op,
            target: target.into(),
            source: Box::new(source),
        }
    }
}

/// Result type alias for whtable operations
pub type Result<T> = std::result::Result<T, WhTableError>;
