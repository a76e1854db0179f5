use crate::error::{Result, WhTableError};

/// Delimiter between the parts of a composite table ID.
pub const ID_DELIMITER: char = '|';

/// Quote character wrapped around every identifier component.
pub const IDENTIFIER_QUOTE: char = '"';

/// The database, schema and name that locate a table.
///
/// Empty database or schema strings are treated as unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableIdentity {
    database: Option<String>,
    schema: Option<String>,
    name: String,
}

impl TableIdentity {
    /// Creates a validated identity.
    pub fn new(
        database: Option<&str>,
        schema: Option<&str>,
        name: impl Into<String>,
    ) -> Result<Self> {
        let identity = Self {
            database: non_empty(database),
            schema: non_empty(schema),
            name: name.into(),
        };
        identity.validate()?;
        Ok(identity)
    }

    /// Creates an identity for a bare table name, with no database or schema.
    pub(crate) fn unchecked(name: impl Into<String>) -> Self {
        Self {
            database: None,
            schema: None,
            name: name.into(),
        }
    }

    /// Rejects empty names and components that would break quoting or the
    /// composite ID encoding.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(WhTableError::InvalidIdentifier {
                field: "name",
                value: self.name.clone(),
                reason: "must not be empty",
            });
        }
        check_component("name", &self.name)?;
        if let Some(database) = &self.database {
            check_component("database", database)?;
        }
        if let Some(schema) = &self.schema {
            check_component("schema", schema)?;
        }
        Ok(())
    }

    pub fn database(&self) -> Option<&str> {
        self.database.as_deref()
    }

    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_database(&mut self, database: Option<&str>) {
        self.database = non_empty(database);
    }

    pub(crate) fn set_schema(&mut self, schema: Option<&str>) {
        self.schema = non_empty(schema);
    }

    /// Returns a copy of this identity under a different name.
    pub(crate) fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

fn check_component(field: &'static str, value: &str) -> Result<()> {
    if value.contains(ID_DELIMITER) {
        return Err(WhTableError::InvalidIdentifier {
            field,
            value: value.to_string(),
            reason: "must not contain '|'",
        });
    }
    if value.contains(IDENTIFIER_QUOTE) {
        return Err(WhTableError::InvalidIdentifier {
            field,
            value: value.to_string(),
            reason: "must not contain '\"'",
        });
    }
    Ok(())
}
