//! Sheet documents and validated fetch results

use std::collections::HashSet;

use serde::Deserialize;
use serde::Serialize;

use crate::error::SourceError;
use crate::model::ColumnDescriptor;
use crate::model::ColumnSchema;
use crate::model::RawRow;
use crate::model::RowId;
use crate::model::RowStore;

/// A JSON data file holding several sheets.
///
/// ```json
/// { "sheets": [ { "name": "orders", "created_by": "ana", "columns": [], "rows": [] } ] }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SheetDocument {
    #[serde(default)]
    pub sheets: Vec<RawSheet>,
}

impl SheetDocument {
    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn summaries(&self) -> Vec<SheetSummary> {
        self.sheets.iter().map(RawSheet::summary).collect()
    }

    /// Finds a sheet by name.
    pub fn sheet(&self, name: &str) -> Option<&RawSheet> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }
}

/// One sheet as stored, before rows are typed against the columns.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSheet {
    pub name: String,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub columns: Vec<ColumnDescriptor>,
    #[serde(default)]
    pub rows: Vec<RawRow>,
}

impl RawSheet {
    pub fn summary(&self) -> SheetSummary {
        SheetSummary {
            name: self.name.clone(),
            created_by: self.created_by.clone(),
            columns: self.columns.len(),
            rows: self.rows.len(),
        }
    }
}

/// Entry of the sheet list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetSummary {
    pub name: String,
    pub created_by: Option<String>,
    pub columns: usize,
    pub rows: usize,
}

impl SheetSummary {
    /// The creator, or "Anonymous" when unknown.
    pub fn created_by_label(&self) -> &str {
        self.created_by.as_deref().unwrap_or("Anonymous")
    }
}

/// A table ready to be loaded: typed rows, unique ids and unique keys.
#[derive(Debug, Clone, PartialEq)]
pub struct TableFetch {
    pub name: String,
    pub created_by: Option<String>,
    pub columns: ColumnSchema,
    pub rows: RowStore,
}

impl TableFetch {
    /// Builds a fetch result, rejecting duplicate row ids and column keys.
    pub fn new(name: impl Into<String>, columns: ColumnSchema, rows: RowStore) -> Result<Self, SourceError> {
        let name = name.into();
        if let Some(key) = columns.duplicate_key() {
            return Err(SourceError::DuplicateColumnKey {
                table: name,
                key: key.to_string(),
            });
        }
        if let Some(id) = rows.duplicate_id() {
            return Err(SourceError::DuplicateRowId {
                table: name,
                id: id.to_string(),
            });
        }
        Ok(Self {
            name,
            created_by: None,
            columns,
            rows,
        })
    }

    /// Types every row against the sheet's columns.
    pub fn from_raw(sheet: RawSheet) -> Result<Self, SourceError> {
        let columns = ColumnSchema::new(sheet.columns);
        let mut seen = HashSet::with_capacity(sheet.rows.len());
        let mut rows = Vec::with_capacity(sheet.rows.len());

        for (position, raw) in sheet.rows.into_iter().enumerate() {
            let Some(id) = raw.id().map(RowId::new) else {
                return Err(SourceError::MissingRowId {
                    table: sheet.name,
                    position,
                });
            };
            if !seen.insert(id.clone()) {
                return Err(SourceError::DuplicateRowId {
                    table: sheet.name,
                    id: id.to_string(),
                });
            }
            rows.push(raw.into_record(id, &columns));
        }

        let mut fetch = Self::new(sheet.name, columns, RowStore::new(rows))?;
        fetch.created_by = sheet.created_by;
        Ok(fetch)
    }

    pub fn summary(&self) -> SheetSummary {
        SheetSummary {
            name: self.name.clone(),
            created_by: self.created_by.clone(),
            columns: self.columns.len(),
            rows: self.rows.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellValue;

    const DOC: &str = r#"{
        "sheets": [
            {
                "name": "orders",
                "columns": [
                    {"key": "order_id", "label": "Order ID", "type": "text"},
                    {"key": "customer_id", "label": "Customer", "type": "reference",
                     "reference_data": [{"id": 1, "name": "Alice"}]}
                ],
                "rows": [
                    {"id": 1, "order_id": "ORD-1", "customer_id": 1},
                    {"id": 2, "order_id": "ORD-2", "customer_id": 99}
                ]
            }
        ]
    }"#;

    #[test]
    fn test_from_raw_types_rows() {
        let doc = SheetDocument::from_json(DOC).unwrap();
        let fetch = TableFetch::from_raw(doc.sheets[0].clone()).unwrap();
        assert_eq!(fetch.rows.len(), 2);
        assert_eq!(
            fetch.rows.get(0).unwrap().value("customer_id"),
            CellValue::Reference("1".into())
        );
    }

    #[test]
    fn test_duplicate_row_id_rejected() {
        let json = r#"{"name": "t", "rows": [{"id": "a"}, {"id": "a"}]}"#;
        let sheet: RawSheet = serde_json::from_str(json).unwrap();
        assert!(matches!(
            TableFetch::from_raw(sheet),
            Err(SourceError::DuplicateRowId { .. })
        ));
    }

    #[test]
    fn test_missing_row_id_rejected() {
        let json = r#"{"name": "t", "rows": [{"id": "a"}, {"x": 1}]}"#;
        let sheet: RawSheet = serde_json::from_str(json).unwrap();
        assert!(matches!(
            TableFetch::from_raw(sheet),
            Err(SourceError::MissingRowId { position: 1, .. })
        ));
    }

    #[test]
    fn test_duplicate_column_key_rejected() {
        let json = r#"{"name": "t", "columns": [
            {"key": "a", "label": "A", "type": "text"},
            {"key": "a", "label": "B", "type": "text"}
        ]}"#;
        let sheet: RawSheet = serde_json::from_str(json).unwrap();
        assert!(matches!(
            TableFetch::from_raw(sheet),
            Err(SourceError::DuplicateColumnKey { .. })
        ));
    }

    #[test]
    fn test_anonymous_creator() {
        let doc = SheetDocument::from_json(DOC).unwrap();
        assert_eq!(doc.summaries()[0].created_by_label(), "Anonymous");
    }
}
