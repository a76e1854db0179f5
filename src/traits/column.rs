/// Trait representing a column of a result set.
pub trait Column {
    /// Returns the column name as it appears in the result.
    fn column_name(&self) -> &'static str;

    /// Returns the name of the relation this column belongs to.
    fn table_name(&self) -> &'static str;

    /// Returns the fully qualified column name (table.column).
    fn qualified_name(&self) -> String {
        format!("{}.{}", self.table_name(), self.column_name())
    }
}
