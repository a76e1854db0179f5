use std::fmt;

use serde::{Deserialize, Serialize};

use super::id::TableId;
use super::schema::{self, DEFAULT_SCHEMA, TABLE_SCHEMA};
use crate::error::{Result, WhTableError};
use crate::types::TableIdentity;

fn default_schema() -> String {
    DEFAULT_SCHEMA.to_string()
}

/// Desired state of a table, as declared in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableConfig {
    pub name: String,
    pub database: String,
    #[serde(default = "default_schema")]
    pub schema: String,
    #[serde(default)]
    pub comment: Option<String>,
}

impl TableConfig {
    pub fn new(name: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            database: database.into(),
            schema: default_schema(),
            comment: None,
        }
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = schema.into();
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    fn value(&self, field: &str) -> Option<&str> {
        match field {
            "name" => Some(&self.name),
            "database" => Some(&self.database),
            "schema" => Some(&self.schema),
            "comment" => self.comment.as_deref(),
            _ => None,
        }
    }

    /// Checks required fields and returns the validated identity.
    pub fn identity(&self) -> Result<TableIdentity> {
        for field in TABLE_SCHEMA.iter().filter(|f| f.required) {
            if self.value(field.name).map_or(true, str::is_empty) {
                return Err(WhTableError::MissingField(field.name));
            }
        }
        let schema = Some(self.schema.as_str())
            .filter(|s| !s.is_empty())
            .or(schema::SCHEMA.default);
        TableIdentity::new(Some(&self.database), schema, &self.name)
    }

    /// Works out what it takes to move `state` to this configuration.
    pub fn plan(&self, state: &TableState) -> TablePlan {
        if state.id.is_none() {
            return TablePlan::Create;
        }
        if schema::DATABASE.requires_replacement(&state.database, &self.database) {
            return TablePlan::Replace(schema::DATABASE.name);
        }
        if schema::SCHEMA.requires_replacement(&state.schema, &self.schema) {
            return TablePlan::Replace(schema::SCHEMA.name);
        }

        let mut changes = Vec::new();
        if schema::NAME.has_change(&state.name, &self.name) {
            changes.push(TableChange::Rename {
                from: state.name.clone(),
                to: self.name.clone(),
            });
        }

        let old_comment = state.comment.as_deref().unwrap_or_default();
        let new_comment = self.comment.as_deref().unwrap_or_default();
        if schema::COMMENT.has_change(old_comment, new_comment) {
            if new_comment.is_empty() {
                changes.push(TableChange::UnsetComment);
            } else {
                changes.push(TableChange::SetComment(new_comment.to_string()));
            }
        }

        if changes.is_empty() {
            TablePlan::NoOp
        } else {
            TablePlan::Update(changes)
        }
    }
}

/// State the host keeps for a table between calls.
///
/// `id` is `None` while the table is absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableState {
    pub id: Option<TableId>,
    pub name: String,
    pub database: String,
    pub schema: String,
    #[serde(default)]
    pub comment: Option<String>,
}

impl TableState {
    /// State for an existing table known only by its ID.
    pub fn from_id(id: TableId) -> Self {
        Self {
            name: id.name.clone(),
            database: id.database.clone(),
            schema: id.schema.clone(),
            comment: None,
            id: Some(id),
        }
    }

    pub fn is_absent(&self) -> bool {
        self.id.is_none()
    }

    /// Returns the ID, failing for a table that was never created.
    pub fn require_id(&self) -> Result<&TableId> {
        self.id.as_ref().ok_or(WhTableError::MissingId)
    }

    pub(crate) fn id_string(&self) -> String {
        self.id.as_ref().map(ToString::to_string).unwrap_or_default()
    }
}

/// One in-place change applied by an update, in the order it is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableChange {
    Rename { from: String, to: String },
    SetComment(String),
    UnsetComment,
}

impl fmt::Display for TableChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableChange::Rename { from, to } => write!(f, "rename {from} to {to}"),
            TableChange::SetComment(_) => write!(f, "set comment"),
            TableChange::UnsetComment => write!(f, "unset comment"),
        }
    }
}

/// Outcome of comparing desired configuration with stored state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TablePlan {
    Create,
    /// A force-new field changed.
    Replace(&'static str),
    Update(Vec<TableChange>),
    NoOp,
}
