mod table;

pub use table::TableBuilder;
