mod identity;
mod row;
mod sql_value;

pub use identity::{TableIdentity, ID_DELIMITER, IDENTIFIER_QUOTE};
pub use row::{QueryResult, RawQueryResult, Row};
pub use sql_value::SqlValue;
