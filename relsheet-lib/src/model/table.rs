//! The table being edited: schema, rows and a version counter.

use super::ColumnDescriptor;
use super::ColumnSchema;
use super::RowStore;

/// Current state of the open table.
///
/// Grid column 0 is the row-number gutter; grid column `j > 0` is schema
/// column `j - 1`. Every replacement bumps `version`, so a host can tell
/// whether its cached snapshot is current by comparing one number.
#[derive(Debug, Clone, Default)]
pub struct TableData {
    name: String,
    columns: ColumnSchema,
    rows: RowStore,
    version: u64,
    dirty: bool,
}

impl TableData {
    pub fn new(name: impl Into<String>, columns: ColumnSchema, rows: RowStore) -> Self {
        Self {
            name: name.into(),
            columns,
            rows,
            version: 0,
            dirty: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &ColumnSchema {
        &self.columns
    }

    pub fn rows(&self) -> &RowStore {
        &self.rows
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Returns `true` once a user change has been applied since the last load.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of grid columns, gutter included.
    pub fn col_count(&self) -> usize {
        self.columns.len() + 1
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Resolves a grid column index to its descriptor; the gutter has none.
    pub fn column_at(&self, col: usize) -> Option<&ColumnDescriptor> {
        col.checked_sub(1).and_then(|index| self.columns.get(index))
    }

    /// Returns `true` if the cell exists and its column accepts edits.
    pub fn is_editable(&self, row: usize, col: usize) -> bool {
        row < self.rows.len() && self.column_at(col).is_some_and(ColumnDescriptor::is_editable)
    }

    /// Replaces the schema after a user change.
    pub fn replace_columns(&mut self, columns: ColumnSchema) {
        self.columns = columns;
        self.touch();
    }

    /// Replaces the rows after a user change.
    pub fn replace_rows(&mut self, rows: RowStore) {
        self.rows = rows;
        self.touch();
    }

    /// Replaces schema and rows together after a user change.
    pub fn replace_both(&mut self, columns: ColumnSchema, rows: RowStore) {
        self.columns = columns;
        self.rows = rows;
        self.touch();
    }

    /// Replaces everything with freshly loaded data; clears the dirty flag.
    pub fn load(&mut self, name: impl Into<String>, columns: ColumnSchema, rows: RowStore) {
        self.name = name.into();
        self.columns = columns;
        self.rows = rows;
        self.version += 1;
        self.dirty = false;
    }

    fn touch(&mut self) {
        self.version += 1;
        self.dirty = true;
    }
}
