use async_trait::async_trait;
use tokio_postgres::{Client, NoTls, SimpleQueryMessage};
use tracing::{debug, error};

use crate::error::{Result, WhTableError};
use crate::traits::DatabaseDriver;
use crate::types::RawQueryResult;

/// Driver implementation using tokio-postgres.
///
/// Statements go over the simple query protocol, which returns every value as
/// text and keeps SQL NULL distinct.
pub struct TokioPostgresDriver {
    client: Client,
}

impl TokioPostgresDriver {
    /// Connect using a key/value or URL connection string.
    pub async fn connect(connection_string: &str) -> Result<Self> {
        let (client, connection) = tokio_postgres::connect(connection_string, NoTls)
            .await
            .map_err(|e| WhTableError::ConnectionFailed(e.to_string()))?;

        // Spawn the connection handler
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                error!(error = %e, "connection error");
            }
        });

        Ok(Self { client })
    }
}

#[async_trait]
impl DatabaseDriver for TokioPostgresDriver {
    async fn execute(&self, sql: &str) -> Result<RawQueryResult> {
        let messages = self
            .client
            .simple_query(sql)
            .await
            .map_err(|e| WhTableError::QueryFailed(e.to_string()))?;

        let mut columns: Vec<String> = Vec::new();
        let mut rows: Vec<Vec<Option<String>>> = Vec::new();

        for message in messages {
            match message {
                SimpleQueryMessage::Row(row) => {
                    if columns.is_empty() {
                        columns = row
                            .columns()
                            .iter()
                            .map(|c| c.name().to_string())
                            .collect();
                    }
                    rows.push(
                        (0..row.len())
                            .map(|i| row.get(i).map(str::to_string))
                            .collect(),
                    );
                }
                SimpleQueryMessage::CommandComplete(count) => {
                    debug!(count, "statement complete");
                }
                _ => {}
            }
        }

        Ok(RawQueryResult::new(columns, rows))
    }
}
