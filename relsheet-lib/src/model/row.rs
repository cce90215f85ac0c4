//! Row records

use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::CellValue;
use super::ColumnKey;

/// Stable identifier of a row.
///
/// Identity is independent of position: inserting rows above a record never
/// changes its id, and ids are never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(String);

impl RowId {
    /// Creates an id from an existing string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Allocates an id that has never been used before.
    pub fn fresh() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RowId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for RowId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

/// One row of the table.
///
/// Values are held per column key; a missing key reads as an empty cell.
///
/// # Example
///
/// ```
/// use relsheet_lib::model::{CellValue, RowRecord};
///
/// let row = RowRecord::new("1")
///     .set("order_id", "ORD-1001")
///     .set("customer_id", CellValue::Reference("1".into()));
///
/// assert_eq!(row.value("order_id"), CellValue::from("ORD-1001"));
/// assert_eq!(row.value("missing"), CellValue::Null);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RowRecord {
    /// The stable identifier.
    pub(crate) id: RowId,

    /// The cell values.
    pub(crate) values: HashMap<ColumnKey, CellValue>,
}

impl RowRecord {
    /// Creates an empty row with the given id.
    pub fn new(id: impl Into<RowId>) -> Self {
        Self {
            id: id.into(),
            values: HashMap::new(),
        }
    }

    /// Creates an empty row with a fresh id.
    pub fn fresh() -> Self {
        Self::new(RowId::fresh())
    }

    /// Returns the row id.
    pub fn id(&self) -> &RowId {
        &self.id
    }

    /// Returns a reference to the stored value, if the key is present.
    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.values.get(&ColumnKey::new(key))
    }

    /// Returns the value for a column, `Null` when absent.
    pub fn value(&self, key: &str) -> CellValue {
        self.get(key).cloned().unwrap_or_default()
    }

    /// Returns the value for a column key, `Null` when absent.
    pub fn value_of(&self, key: &ColumnKey) -> CellValue {
        self.values.get(key).cloned().unwrap_or_default()
    }

    /// Returns `true` if the row has a value for the key.
    pub fn contains(&self, key: &ColumnKey) -> bool {
        self.values.contains_key(key)
    }

    /// Returns all stored values.
    pub fn values(&self) -> &HashMap<ColumnKey, CellValue> {
        &self.values
    }

    /// Sets a value (builder pattern).
    pub fn set(mut self, key: impl Into<ColumnKey>, value: impl Into<CellValue>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Inserts a value.
    pub fn insert(&mut self, key: impl Into<ColumnKey>, value: impl Into<CellValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Removes a value and returns it.
    pub fn remove(&mut self, key: &ColumnKey) -> Option<CellValue> {
        self.values.remove(key)
    }

    /// Copies every value into a new row with a fresh id.
    pub fn duplicate(&self) -> Self {
        Self {
            id: RowId::fresh(),
            values: self.values.clone(),
        }
    }
}
