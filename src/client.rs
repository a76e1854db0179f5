use std::sync::Arc;

use tracing::info;

use crate::config::ConnectionConfig;
use crate::drivers::TokioPostgresDriver;
use crate::error::Result;
use crate::resource::TableResource;
use crate::traits::DatabaseDriver;

/// Main entry point for whtable.
/// Holds the warehouse connection shared by every resource it hands out.
pub struct WhTableClient {
    driver: Arc<dyn DatabaseDriver>,
}

impl WhTableClient {
    /// Connect to the warehouse described by `config`.
    ///
    /// # Example
    /// ```ignore
    /// let config = ConnectionConfig::from_env()?;
    /// let client = WhTableClient::connect(&config).await?;
    /// ```
    pub async fn connect(config: &ConnectionConfig) -> Result<Self> {
        let driver = TokioPostgresDriver::connect(&config.connection_string()).await?;
        info!(host = %config.host, port = config.port, user = %config.user, "connected");
        Ok(Self {
            driver: Arc::new(driver),
        })
    }

    /// Create a new client with a custom driver.
    /// Useful for testing or using alternative database drivers.
    pub fn with_driver(driver: Arc<dyn DatabaseDriver>) -> Self {
        Self { driver }
    }

    /// Lifecycle callbacks for table resources.
    pub fn tables(&self) -> TableResource {
        TableResource::new(Arc::clone(&self.driver))
    }
}
