mod column;
mod driver;

pub use column::Column;
pub use driver::DatabaseDriver;
