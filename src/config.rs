use std::fmt;

use serde::Deserialize;

use crate::error::{Result, WhTableError};

fn default_port() -> u16 {
    5432
}

/// Connection settings for the warehouse.
///
/// Deserializes from the provider configuration block, or loads from
/// `WHTABLE_*` environment variables with [`ConnectionConfig::from_env`].
#[derive(Clone, PartialEq, Deserialize)]
pub struct ConnectionConfig {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub user: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub dbname: Option<String>,
    #[serde(default)]
    pub application_name: Option<String>,
}

impl ConnectionConfig {
    pub fn new(host: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: default_port(),
            user: user.into(),
            password: None,
            dbname: None,
            application_name: None,
        }
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn with_dbname(mut self, dbname: impl Into<String>) -> Self {
        self.dbname = Some(dbname.into());
        self
    }

    /// Load from the process environment.
    ///
    /// `WHTABLE_HOST` and `WHTABLE_USER` are required; `WHTABLE_PORT`,
    /// `WHTABLE_PASSWORD`, `WHTABLE_DBNAME` and `WHTABLE_APPLICATION_NAME`
    /// are optional.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let host = lookup("WHTABLE_HOST").ok_or(WhTableError::MissingField("WHTABLE_HOST"))?;
        let user = lookup("WHTABLE_USER").ok_or(WhTableError::MissingField("WHTABLE_USER"))?;
        let port = match lookup("WHTABLE_PORT") {
            Some(port) => port
                .parse()
                .map_err(|_| WhTableError::InvalidConfig(format!("WHTABLE_PORT={port}")))?,
            None => default_port(),
        };

        Ok(Self {
            host,
            port,
            user,
            password: lookup("WHTABLE_PASSWORD"),
            dbname: lookup("WHTABLE_DBNAME"),
            application_name: lookup("WHTABLE_APPLICATION_NAME"),
        })
    }

    /// Renders the key/value connection string understood by tokio-postgres.
    pub fn connection_string(&self) -> String {
        let mut parts = vec![
            format!("host={}", quote_value(&self.host)),
            format!("port={}", self.port),
            format!("user={}", quote_value(&self.user)),
        ];
        if let Some(password) = &self.password {
            parts.push(format!("password={}", quote_value(password)));
        }
        if let Some(dbname) = &self.dbname {
            parts.push(format!("dbname={}", quote_value(dbname)));
        }
        if let Some(name) = &self.application_name {
            parts.push(format!("application_name={}", quote_value(name)));
        }
        parts.join(" ")
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("dbname", &self.dbname)
            .field("application_name", &self.application_name)
            .finish()
    }
}

fn quote_value(value: &str) -> String {
    if !value.is_empty() && !value.contains(|c: char| c.is_whitespace() || c == '\'' || c == '\\') {
        return value.to_string();
    }
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}
