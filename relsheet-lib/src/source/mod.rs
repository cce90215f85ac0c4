//! Data sources
//!
//! A [`TableSource`] fetches whole tables by name. The grid never reads
//! partial data: a fetch result either replaces the current table wholesale
//! or is discarded, see [`TableLoader`].

mod document;
mod file;
mod loader;
mod memory;

pub use document::*;
pub use file::*;
pub use loader::*;
pub use memory::*;

use async_trait::async_trait;

use crate::error::SourceError;

/// Trait for table sources.
///
/// # Example
///
/// ```ignore
/// use relsheet_lib::source::{JsonFileSource, TableSource};
///
/// let source = JsonFileSource::new("sheets.json");
/// for sheet in source.list_tables().await? {
///     println!("{} by {}", sheet.name, sheet.created_by_label());
/// }
/// let orders = source.fetch_table("orders").await?;
/// ```
#[async_trait]
pub trait TableSource: Send + Sync {
    /// Fetches one table with its columns and rows.
    async fn fetch_table(&self, name: &str) -> Result<TableFetch, SourceError>;

    /// Lists the available tables.
    async fn list_tables(&self) -> Result<Vec<SheetSummary>, SourceError>;
}
