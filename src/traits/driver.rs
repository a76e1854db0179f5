use async_trait::async_trait;

use crate::error::Result;
use crate::types::RawQueryResult;

/// Trait for database driver implementations.
/// Drivers are responsible for:
/// - Connecting to the database
/// - Executing statements and converting results to RawQueryResult
///
/// The handle is shared across resources, so implementations must be safe
/// for concurrent use.
#[async_trait]
pub trait DatabaseDriver: Send + Sync {
    /// Execute a single SQL statement.
    async fn execute(&self, sql: &str) -> Result<RawQueryResult>;
}
