//! JSON file table source

use std::path::Path;
use std::path::PathBuf;

use async_trait::async_trait;

use super::SheetDocument;
use super::SheetSummary;
use super::TableFetch;
use super::TableSource;
use crate::error::SourceError;

/// Reads tables from a JSON sheet document on disk.
///
/// The file is read on every request, so edits made by other programs show
/// up on the next fetch.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_document(&self) -> Result<SheetDocument, SourceError> {
        let json = tokio::fs::read_to_string(&self.path).await?;
        SheetDocument::from_json(&json)
    }
}

#[async_trait]
impl TableSource for JsonFileSource {
    async fn fetch_table(&self, name: &str) -> Result<TableFetch, SourceError> {
        let document = self.read_document().await?;
        let sheet = document
            .sheets
            .into_iter()
            .find(|sheet| sheet.name == name)
            .ok_or_else(|| SourceError::NotFound(name.to_string()))?;
        TableFetch::from_raw(sheet)
    }

    async fn list_tables(&self) -> Result<Vec<SheetSummary>, SourceError> {
        Ok(self.read_document().await?.summaries())
    }
}
