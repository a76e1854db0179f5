//! whtable - manage warehouse tables from declarative configuration
//!
//! Renders `CREATE`/`ALTER`/`DROP`/`SHOW TABLES` statements for a table and
//! reconciles what the warehouse reports back into the declared state.
//!
//! # Example
//! ```ignore
//! use whtable::{ConnectionConfig, TableConfig, TableState, WhTableClient};
//!
//! let client = WhTableClient::connect(&ConnectionConfig::from_env()?).await?;
//! let tables = client.tables();
//!
//! let mut state = TableState::default();
//! tables
//!     .create(&mut state, &TableConfig::new("EVENTS", "ANALYTICS").with_comment("raw events"))
//!     .await?;
//! assert_eq!(state.id.unwrap().to_string(), "ANALYTICS|PUBLIC|EVENTS");
//! ```

pub mod builders;
pub mod config;
pub mod drivers;
pub mod error;
pub mod normalize;
pub mod resource;
pub mod traits;
pub mod types;

mod client;

// Re-export main types for convenient access
pub use builders::TableBuilder;
pub use client::WhTableClient;
pub use config::ConnectionConfig;
pub use error::{Result, WhTableError};
pub use normalize::{normalize_statement, suppress_statement_diff};
pub use resource::{
    TableChange, TableConfig, TableId, TablePlan, TableRecord, TableResource, TableState,
};
pub use traits::{Column, DatabaseDriver};
pub use types::{QueryResult, RawQueryResult, Row, SqlValue, TableIdentity};
