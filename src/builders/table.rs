use crate::types::{SqlValue, TableIdentity, IDENTIFIER_QUOTE};

/// Renders the DDL statements for a single warehouse table.
///
/// The builder is a value: configuration calls consume and return it, and
/// every render call is pure. [`TableBuilder::rename`] hands back a new
/// builder instead of changing this one.
///
/// Supported statements are:
///   - CREATE TABLE
///   - ALTER TABLE (rename, set/unset comment)
///   - DROP TABLE
///   - SHOW TABLES
#[derive(Debug, Clone, PartialEq)]
pub struct TableBuilder {
    identity: TableIdentity,
    comment: Option<String>,
}

impl TableBuilder {
    /// Start a builder for the table with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_identity(TableIdentity::unchecked(name))
    }

    /// Start a builder from an already validated identity.
    pub fn from_identity(identity: TableIdentity) -> Self {
        Self {
            identity,
            comment: None,
        }
    }

    /// Set the database the table lives in. An empty string unsets it.
    pub fn with_database(mut self, database: &str) -> Self {
        self.identity.set_database(Some(database));
        self
    }

    /// Set the schema the table lives in. An empty string unsets it.
    pub fn with_schema(mut self, schema: &str) -> Self {
        self.identity.set_schema(Some(schema));
        self
    }

    /// Set the comment used by [`TableBuilder::create`].
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn identity(&self) -> &TableIdentity {
        &self.identity
    }

    /// Prepends the database and schema if set and quotes every component.
    ///
    /// A database without a schema renders as `"db".."name"`, which the
    /// warehouse resolves against the default schema.
    pub fn qualified_name(&self) -> String {
        let mut name = String::with_capacity(64);

        match (self.identity.database(), self.identity.schema()) {
            (Some(database), Some(schema)) => {
                name.push_str(&quote(database));
                name.push('.');
                name.push_str(&quote(schema));
                name.push('.');
            }
            (Some(database), None) => {
                name.push_str(&quote(database));
                name.push_str("..");
            }
            (None, Some(schema)) => {
                name.push_str(&quote(schema));
                name.push('.');
            }
            (None, None) => {}
        }

        name.push_str(&quote(self.identity.name()));
        name
    }

    /// Statement that creates (or replaces) the table.
    ///
    /// Column definitions are not modelled yet; the table gets a single
    /// placeholder column.
    pub fn create(&self) -> String {
        let mut sql = String::with_capacity(128);

        sql.push_str("CREATE OR REPLACE TABLE ");
        sql.push_str(&self.qualified_name());
        sql.push_str("(placeholder varchar(100))");

        if let Some(comment) = self.comment.as_deref().filter(|c| !c.is_empty()) {
            sql.push_str(" COMMENT = ");
            sql.push_str(&SqlValue::from(comment).to_sql_literal());
        }

        sql
    }

    /// Statement that renames the table, plus a builder for the renamed table.
    pub fn rename(&self, new_name: &str) -> (String, TableBuilder) {
        let renamed = Self {
            identity: self.identity.renamed(new_name),
            comment: self.comment.clone(),
        };
        let sql = format!(
            "ALTER TABLE {} RENAME TO {}",
            self.qualified_name(),
            renamed.qualified_name()
        );
        (sql, renamed)
    }

    /// Statement that sets the comment on the table.
    pub fn change_comment(&self, comment: &str) -> String {
        format!(
            "ALTER TABLE {} SET COMMENT = {}",
            self.qualified_name(),
            SqlValue::from(comment).to_sql_literal()
        )
    }

    /// Statement that removes the comment from the table.
    pub fn remove_comment(&self) -> String {
        format!("ALTER TABLE {} UNSET COMMENT", self.qualified_name())
    }

    /// Statement that lists the row describing this table.
    ///
    /// Only the database scopes the listing; the schema is not used.
    pub fn show(&self) -> String {
        let pattern = SqlValue::from(self.identity.name()).to_sql_literal();
        match self.identity.database() {
            None => format!("SHOW TABLES LIKE {}", pattern),
            Some(database) => format!(
                "SHOW TABLES LIKE {} IN DATABASE {}",
                pattern,
                quote(database)
            ),
        }
    }

    /// Statement that drops the table.
    pub fn drop(&self) -> String {
        format!("DROP TABLE {}", self.qualified_name())
    }
}

fn quote(identifier: &str) -> String {
    format!("{IDENTIFIER_QUOTE}{identifier}{IDENTIFIER_QUOTE}")
}
