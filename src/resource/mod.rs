mod id;
mod record;
pub mod schema;
mod state;
mod table;

pub use id::TableId;
pub use record::{ShowTablesColumn, TableRecord};
pub use state::{TableChange, TableConfig, TablePlan, TableState};
pub use table::TableResource;
