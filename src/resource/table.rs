use std::sync::Arc;

use tracing::{debug, info, warn};

use super::id::TableId;
use super::record::TableRecord;
use super::state::{TableChange, TableConfig, TablePlan, TableState};
use crate::builders::TableBuilder;
use crate::error::{Result, WhTableError};
use crate::traits::DatabaseDriver;
use crate::types::QueryResult;

/// Lifecycle callbacks for a warehouse table resource.
///
/// Every callback runs its statements one at a time over the shared driver
/// and returns the first error it hits.
pub struct TableResource {
    driver: Arc<dyn DatabaseDriver>,
}

impl TableResource {
    pub(crate) fn new(driver: Arc<dyn DatabaseDriver>) -> Self {
        Self { driver }
    }

    async fn execute(&self, sql: &str) -> Result<QueryResult> {
        debug!(sql, "executing statement");
        let raw = self.driver.execute(sql).await?;
        Ok(QueryResult::from_raw(raw))
    }

    /// Creates the table described by `config` and records it in `state`.
    ///
    /// `state` is left untouched if the create statement fails. Once it
    /// succeeds the ID is assigned, then the table is read back.
    pub async fn create(
        &self,
        state: &mut TableState,
        config: &TableConfig,
    ) -> Result<TableRecord> {
        let identity = config.identity()?;
        let mut builder = TableBuilder::from_identity(identity.clone());
        if let Some(comment) = &config.comment {
            builder = builder.with_comment(comment.as_str());
        }

        if let Err(e) = self.execute(&builder.create()).await {
            warn!(table = %config.name, error = %e, "create failed");
            return Err(WhTableError::operation("creating", &config.name, e));
        }

        let id = TableId::from_identity(&identity);
        info!(id = %id, "created table");
        *state = TableState {
            name: config.name.clone(),
            database: config.database.clone(),
            schema: id.schema.clone(),
            comment: config.comment.clone(),
            id: Some(id),
        };

        self.read(state).await
    }

    /// Refreshes `state` from the warehouse.
    ///
    /// Name, schema and database are copied back; the comment is returned in
    /// the record but not written to `state`.
    pub async fn read(&self, state: &mut TableState) -> Result<TableRecord> {
        let id = state.require_id()?;
        let builder = TableBuilder::from_identity(id.identity()?);

        let result = match self.execute(&builder.show()).await {
            Ok(result) => result,
            Err(e) => {
                warn!(id = %id, error = %e, "read failed");
                return Err(WhTableError::operation("reading", id.to_string(), e));
            }
        };
        let row = result
            .first_row()
            .ok_or_else(|| WhTableError::NotFound { id: id.to_string() })?;
        let record = TableRecord::scan(&row);

        state.name = record.name.clone().unwrap_or_default();
        state.schema = record.schema_name.clone().unwrap_or_default();
        state.database = record.database_name.clone().unwrap_or_default();

        Ok(record)
    }

    /// Applies in-place changes needed to reach `config`, then reads back.
    ///
    /// `config` is validated before anything runs, so a rename to a name the
    /// ID encoding cannot carry executes nothing and leaves `state` as is.
    ///
    /// Changes run in order: rename first, then the comment. Each one is
    /// committed to `state` as soon as it succeeds. A failure returns
    /// [`WhTableError::PartialUpdate`] listing what was applied; nothing is
    /// rolled back.
    pub async fn update(
        &self,
        state: &mut TableState,
        config: &TableConfig,
    ) -> Result<TableRecord> {
        // the rename target must satisfy the same rules as a new table
        config.identity()?;
        let changes = match config.plan(state) {
            TablePlan::Update(changes) => changes,
            TablePlan::NoOp => Vec::new(),
            TablePlan::Replace(field) => return Err(WhTableError::RequiresReplacement { field }),
            TablePlan::Create => return Err(WhTableError::MissingId),
        };
        let mut id = state.require_id()?.clone();

        let mut builder = TableBuilder::from_identity(id.identity()?);
        let mut applied = Vec::with_capacity(changes.len());

        for change in changes {
            let (sql, renamed) = match &change {
                TableChange::Rename { to, .. } => {
                    let (sql, renamed) = builder.rename(to);
                    (sql, Some(renamed))
                }
                TableChange::SetComment(comment) => (builder.change_comment(comment), None),
                TableChange::UnsetComment => (builder.remove_comment(), None),
            };

            if let Err(e) = self.execute(&sql).await {
                warn!(id = %id, change = %change, error = %e, "update step failed");
                return Err(WhTableError::PartialUpdate {
                    id: id.to_string(),
                    applied,
                    failed: change,
                    source: Box::new(e),
                });
            }

            match &change {
                TableChange::Rename { to, .. } => {
                    id = id.renamed(to.as_str());
                    state.name = to.clone();
                    state.id = Some(id.clone());
                }
                TableChange::SetComment(comment) => state.comment = Some(comment.clone()),
                TableChange::UnsetComment => state.comment = None,
            }
            if let Some(renamed) = renamed {
                builder = renamed;
            }
            info!(id = %id, change = %change, "applied table change");
            applied.push(change);
        }

        self.read(state).await
    }

    /// Drops the table and clears the ID.
    pub async fn delete(&self, state: &mut TableState) -> Result<()> {
        let id = state.require_id()?;
        let builder = TableBuilder::from_identity(id.identity()?);

        if let Err(e) = self.execute(&builder.drop()).await {
            warn!(id = %id, error = %e, "drop failed");
            return Err(WhTableError::operation("deleting", state.id_string(), e));
        }

        info!(id = %id, "dropped table");
        state.id = None;
        Ok(())
    }

    /// Returns whether the table is listed by the warehouse.
    pub async fn exists(&self, state: &TableState) -> Result<bool> {
        let id = state.require_id()?;
        let builder = TableBuilder::from_identity(id.identity()?);

        match self.execute(&builder.show()).await {
            Ok(result) => Ok(!result.is_empty()),
            Err(e) => {
                warn!(id = %id, error = %e, "existence check failed");
                Err(WhTableError::operation("checking", id.to_string(), e))
            }
        }
    }

    /// Imports an existing table from its `<database>|<schema>|<table>` ID.
    pub async fn import(&self, id: &str) -> Result<TableState> {
        let mut state = TableState::from_id(id.parse()?);
        self.read(&mut state).await?;
        Ok(state)
    }
}
