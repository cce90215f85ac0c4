//! Last-request-wins table loading

use serde::Serialize;

use super::TableFetch;
use crate::error::SourceError;
use crate::model::TableData;

/// Handle for one table request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FetchTicket {
    seq: u64,
    name: String,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// What happened to a fetch result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LoadOutcome {
    /// The table was replaced.
    Applied { name: String, version: u64 },
    /// A newer request was issued; the result was dropped.
    Stale,
    /// The source failed; the previous table is kept.
    Failed { error: String },
}

/// Numbers table requests and applies only the latest one.
///
/// Results arriving for a superseded ticket are discarded, and a failed
/// fetch leaves the table as it was.
#[derive(Debug, Default)]
pub struct TableLoader {
    issued: u64,
    pending: Option<u64>,
}

impl TableLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a ticket for `name`, superseding any request still in flight.
    pub fn begin(&mut self, name: impl Into<String>) -> FetchTicket {
        self.issued += 1;
        if let Some(previous) = self.pending.replace(self.issued) {
            log::debug!("Fetch #{} superseded by #{}", previous, self.issued);
        }
        FetchTicket {
            seq: self.issued,
            name: name.into(),
        }
    }

    /// Returns `true` if `ticket` is the request whose result would be applied.
    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        self.pending == Some(ticket.seq)
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Applies the result of `ticket` to `table` if it is still current.
    pub fn finish(
        &mut self,
        ticket: &FetchTicket,
        result: Result<TableFetch, SourceError>,
        table: &mut TableData,
    ) -> LoadOutcome {
        if !self.is_current(ticket) {
            log::warn!("Dropping stale result of fetch #{} for '{}'", ticket.seq, ticket.name);
            return LoadOutcome::Stale;
        }
        self.pending = None;

        match result {
            Ok(fetch) => {
                table.load(fetch.name, fetch.columns, fetch.rows);
                log::debug!(
                    "Loaded '{}' ({} rows, {} columns) as version {}",
                    table.name(),
                    table.row_count(),
                    table.columns().len(),
                    table.version()
                );
                LoadOutcome::Applied {
                    name: table.name().to_string(),
                    version: table.version(),
                }
            }
            Err(err) => {
                log::warn!("Failed to load '{}': {}", ticket.name, err);
                LoadOutcome::Failed { error: err.to_string() }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ColumnSchema;
    use crate::model::RowRecord;
    use crate::model::RowStore;

    fn fetch(name: &str, rows: usize) -> TableFetch {
        let rows = (0..rows).map(|i| RowRecord::new(i.to_string())).collect();
        TableFetch::new(name, ColumnSchema::default(), RowStore::new(rows)).unwrap()
    }

    #[test]
    fn test_stale_result_dropped() {
        let mut loader = TableLoader::new();
        let mut table = TableData::default();

        let first = loader.begin("a");
        let second = loader.begin("b");

        assert_eq!(
            loader.finish(&second, Ok(fetch("b", 2)), &mut table),
            LoadOutcome::Applied { name: "b".into(), version: 1 }
        );
        assert_eq!(loader.finish(&first, Ok(fetch("a", 5)), &mut table), LoadOutcome::Stale);
        assert_eq!(table.name(), "b");
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_failure_keeps_table() {
        let mut loader = TableLoader::new();
        let mut table = TableData::default();
        let ticket = loader.begin("a");
        loader.finish(&ticket, Ok(fetch("a", 1)), &mut table);

        let ticket = loader.begin("missing");
        let outcome = loader.finish(&ticket, Err(SourceError::NotFound("missing".into())), &mut table);
        assert!(matches!(outcome, LoadOutcome::Failed { .. }));
        assert_eq!(table.name(), "a");
        assert_eq!(table.version(), 1);
        assert!(!loader.is_loading());
    }

    #[test]
    fn test_ticket_applies_once() {
        let mut loader = TableLoader::new();
        let mut table = TableData::default();
        let ticket = loader.begin("a");
        loader.finish(&ticket, Ok(fetch("a", 1)), &mut table);
        assert_eq!(loader.finish(&ticket, Ok(fetch("a", 3)), &mut table), LoadOutcome::Stale);
    }
}
