//! Row store snapshot

use std::sync::Arc;

use super::CellValue;
use super::ColumnKey;
use super::RowId;
use super::RowRecord;

/// Immutable, ordered list of rows.
///
/// Like [`ColumnSchema`](super::ColumnSchema), every change produces a new
/// store. Rows are addressed by position for insertion and by [`RowId`] for
/// removal and value updates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowStore {
    rows: Arc<Vec<RowRecord>>,
}

impl RowStore {
    pub fn new(rows: Vec<RowRecord>) -> Self {
        Self { rows: Arc::new(rows) }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&RowRecord> {
        self.rows.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RowRecord> {
        self.rows.iter()
    }

    pub fn as_slice(&self) -> &[RowRecord] {
        &self.rows
    }

    /// Returns the current position of a row.
    pub fn position(&self, id: &RowId) -> Option<usize> {
        self.rows.iter().position(|row| &row.id == id)
    }

    pub fn by_id(&self, id: &RowId) -> Option<&RowRecord> {
        self.rows.iter().find(|row| &row.id == id)
    }

    /// Returns the first id that appears more than once.
    pub fn duplicate_id(&self) -> Option<&RowId> {
        let mut seen = std::collections::HashSet::with_capacity(self.rows.len());
        self.rows.iter().map(|row| &row.id).find(|id| !seen.insert(*id))
    }

    /// Returns a new store with `row` spliced in at `index` (clamped to the end).
    pub fn with_inserted(&self, index: usize, row: RowRecord) -> Self {
        let mut rows = self.rows.as_ref().clone();
        rows.insert(index.min(rows.len()), row);
        Self::new(rows)
    }

    /// Returns a new store without the row carrying `id`.
    pub fn with_removed_id(&self, id: &RowId) -> Option<(Self, RowRecord)> {
        let index = self.position(id)?;
        let mut rows = self.rows.as_ref().clone();
        let removed = rows.remove(index);
        Some((Self::new(rows), removed))
    }

    /// Returns a new store with one value of one row replaced.
    pub fn with_value(&self, id: &RowId, key: &ColumnKey, value: CellValue) -> Option<Self> {
        let index = self.position(id)?;
        let mut rows = self.rows.as_ref().clone();
        let row = &mut rows[index];
        if value.is_null() {
            row.remove(key);
        } else {
            row.insert(key.clone(), value);
        }
        Some(Self::new(rows))
    }

    /// Returns a new store with `key` removed from every row.
    pub fn without_column(&self, key: &ColumnKey) -> Self {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut row = row.clone();
                row.remove(key);
                row
            })
            .collect();
        Self::new(rows)
    }

    /// Returns `true` if both stores share the same allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.rows, &other.rows)
    }
}

impl From<Vec<RowRecord>> for RowStore {
    fn from(rows: Vec<RowRecord>) -> Self {
        Self::new(rows)
    }
}
