use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WhTableError};
use crate::types::{TableIdentity, ID_DELIMITER};

/// The `<database>|<schema>|<table>` ID the host persists for a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TableId {
    pub database: String,
    pub schema: String,
    pub name: String,
}

impl TableId {
    pub fn new(
        database: impl Into<String>,
        schema: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            database: database.into(),
            schema: schema.into(),
            name: name.into(),
        }
    }

    /// Builds the ID for a validated identity.
    pub fn from_identity(identity: &TableIdentity) -> Self {
        Self::new(
            identity.database().unwrap_or_default(),
            identity.schema().unwrap_or_default(),
            identity.name(),
        )
    }

    /// Validates the parts and returns the identity they locate.
    pub fn identity(&self) -> Result<TableIdentity> {
        TableIdentity::new(Some(&self.database), Some(&self.schema), &self.name)
    }

    /// The same table under a new name.
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{d}{}{d}{}",
            self.database,
            self.schema,
            self.name,
            d = ID_DELIMITER
        )
    }
}

impl FromStr for TableId {
    type Err = WhTableError;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(ID_DELIMITER).collect();
        match parts.as_slice() {
            [database, schema, name] => Ok(Self::new(*database, *schema, *name)),
            _ => Err(WhTableError::InvalidId(s.to_string())),
        }
    }
}

impl TryFrom<String> for TableId {
    type Error = WhTableError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<TableId> for String {
    fn from(id: TableId) -> Self {
        id.to_string()
    }
}
