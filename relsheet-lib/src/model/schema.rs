//! Column schema snapshot

use std::sync::Arc;

use super::ColumnDescriptor;
use super::ColumnKey;

/// Immutable, ordered list of column descriptors.
///
/// Cloning is cheap (one `Arc`). Every mutation returns a new schema and
/// leaves the original untouched, so a consumer holding an older snapshot
/// never sees a half-applied change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnSchema {
    columns: Arc<Vec<ColumnDescriptor>>,
}

impl ColumnSchema {
    pub fn new(columns: Vec<ColumnDescriptor>) -> Self {
        Self {
            columns: Arc::new(columns),
        }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Returns the column at a schema index (not a grid column index).
    pub fn get(&self, index: usize) -> Option<&ColumnDescriptor> {
        self.columns.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.columns.iter()
    }

    pub fn as_slice(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    /// Returns the schema index of a key.
    pub fn position(&self, key: &ColumnKey) -> Option<usize> {
        self.columns.iter().position(|c| &c.key == key)
    }

    pub fn by_key(&self, key: &ColumnKey) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| &c.key == key)
    }

    /// Returns the first key that appears more than once.
    pub fn duplicate_key(&self) -> Option<&ColumnKey> {
        self.columns.iter().enumerate().find_map(|(i, column)| {
            self.columns[..i]
                .iter()
                .any(|earlier| earlier.key == column.key)
                .then_some(&column.key)
        })
    }

    /// Returns a new schema with `column` inserted at `index` (clamped to the end).
    pub fn with_inserted(&self, index: usize, column: ColumnDescriptor) -> Self {
        let mut columns = self.columns.as_ref().clone();
        columns.insert(index.min(columns.len()), column);
        Self::new(columns)
    }

    /// Returns a new schema without the column at `index`.
    pub fn with_removed(&self, index: usize) -> Option<(Self, ColumnDescriptor)> {
        if index >= self.columns.len() {
            return None;
        }
        let mut columns = self.columns.as_ref().clone();
        let removed = columns.remove(index);
        Some((Self::new(columns), removed))
    }

    /// Returns a new schema where the column with the same key is replaced.
    pub fn with_replaced(&self, column: ColumnDescriptor) -> Option<Self> {
        let index = self.position(&column.key)?;
        let mut columns = self.columns.as_ref().clone();
        columns[index] = column;
        Some(Self::new(columns))
    }

    /// Returns `true` if both schemas share the same allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.columns, &other.columns)
    }
}

impl From<Vec<ColumnDescriptor>> for ColumnSchema {
    fn from(columns: Vec<ColumnDescriptor>) -> Self {
        Self::new(columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ColumnType;

    fn schema() -> ColumnSchema {
        ColumnSchema::new(vec![
            ColumnDescriptor::new("a", "A", ColumnType::Text),
            ColumnDescriptor::new("b", "B", ColumnType::Number),
        ])
    }

    #[test]
    fn test_mutations_leave_original_untouched() {
        let original = schema();
        let inserted = original.with_inserted(1, ColumnDescriptor::new("c", "C", ColumnType::Text));
        assert_eq!(original.len(), 2);
        assert_eq!(inserted.len(), 3);
        assert_eq!(inserted.get(1).map(|c| c.key.as_str()), Some("c"));
        assert!(!inserted.ptr_eq(&original));
    }

    #[test]
    fn test_with_removed_out_of_bounds() {
        assert!(schema().with_removed(2).is_none());
        let (rest, removed) = schema().with_removed(0).unwrap();
        assert_eq!(removed.key.as_str(), "a");
        assert_eq!(rest.len(), 1);
    }

    #[test]
    fn test_with_replaced_matches_by_key() {
        let renamed = ColumnDescriptor::new("b", "Bee", ColumnType::Number);
        let schema = schema().with_replaced(renamed).unwrap();
        assert_eq!(schema.get(1).map(|c| c.label.as_str()), Some("Bee"));
        assert!(schema.with_replaced(ColumnDescriptor::new("z", "Z", ColumnType::Text)).is_none());
    }

    #[test]
    fn test_duplicate_key() {
        assert!(schema().duplicate_key().is_none());
        let dup = schema().with_inserted(2, ColumnDescriptor::new("a", "Again", ColumnType::Text));
        assert_eq!(dup.duplicate_key().map(|k| k.as_str()), Some("a"));
    }
}
