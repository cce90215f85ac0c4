//! In-memory table source using DashMap

use async_trait::async_trait;
use dashmap::DashMap;

use super::SheetDocument;
use super::SheetSummary;
use super::TableFetch;
use super::TableSource;
use crate::error::SourceError;

/// Tables held in a concurrent hash map.
///
/// Useful for tests and for hosts that already have their data in memory.
///
/// # Example
///
/// ```
/// use relsheet_lib::source::{InMemorySource, TableFetch};
/// use relsheet_lib::model::{ColumnSchema, RowStore};
///
/// let source = InMemorySource::new();
/// source.insert(TableFetch::new("orders", ColumnSchema::default(), RowStore::default()).unwrap());
/// assert_eq!(source.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct InMemorySource {
    tables: DashMap<String, TableFetch>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self {
            tables: DashMap::new(),
        }
    }

    /// Loads every sheet of a document, failing on the first invalid one.
    pub fn from_document(document: SheetDocument) -> Result<Self, SourceError> {
        let source = Self::new();
        for sheet in document.sheets {
            source.insert(TableFetch::from_raw(sheet)?);
        }
        Ok(source)
    }

    /// Adds or replaces a table under its own name.
    pub fn insert(&self, table: TableFetch) {
        self.tables.insert(table.name.clone(), table);
    }

    pub fn remove(&self, name: &str) -> Option<TableFetch> {
        self.tables.remove(name).map(|(_, table)| table)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[async_trait]
impl TableSource for InMemorySource {
    async fn fetch_table(&self, name: &str) -> Result<TableFetch, SourceError> {
        self.tables
            .get(name)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| SourceError::NotFound(name.to_string()))
    }

    async fn list_tables(&self) -> Result<Vec<SheetSummary>, SourceError> {
        let mut summaries: Vec<SheetSummary> = self.tables.iter().map(|entry| entry.value().summary()).collect();
        summaries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(summaries)
    }
}
