//! Custom serialization for RowRecord.
//!
//! ## Write Format (Serialization)
//!
//! A row serializes as one flat object:
//! - The identifier: `"id": "3f2c..."`
//! - Every non-empty value under its column key: `"amount": "12.50"`
//! - Formulas keep their leading `=`: `"total": "=SUM(amount)"`
//!
//! ## Read Format (Deserialization)
//!
//! Rows are read into a [`RawRow`] first, because raw JSON can only be
//! interpreted once the column types are known:
//! - `id` may be a string or a number
//! - Every other entry is a column key with a raw JSON value
//!
//! [`RawRow::into_record`] then coerces each value against the schema. Values
//! that do not fit their column type are kept as text so nothing is dropped.

use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::MapAccess;
use serde::de::Visitor;
use serde::ser::SerializeMap;
use serde_json::Value as Json;

use super::CellValue;
use super::ColumnKey;
use super::ColumnSchema;
use super::ColumnType;
use super::RowId;
use super::RowRecord;
use super::parse;

// =============================================================================
// Serialization (for writes)
// =============================================================================

impl Serialize for RowRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("id", &self.id)?;

        // Sorted so the output is stable
        let mut keys: Vec<&ColumnKey> = self.values.keys().collect();
        keys.sort();

        for key in keys {
            match &self.values[key] {
                CellValue::Null => {}
                CellValue::Formula(expr) => {
                    map.serialize_entry(key, &format!("={}", expr))?;
                }
                value => {
                    map.serialize_entry(key, value)?;
                }
            }
        }

        map.end()
    }
}

// =============================================================================
// Deserialization (from reads)
// =============================================================================

/// A row as read from a data source, before its values are typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    id: Option<String>,
    fields: HashMap<String, Json>,
}

impl RawRow {
    /// Returns the row identifier, if the source supplied a usable one.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    /// Returns the raw value of a field.
    pub fn field(&self, key: &str) -> Option<&Json> {
        self.fields.get(key)
    }

    /// Coerces every field against the schema and builds a record.
    pub fn into_record(self, id: RowId, schema: &ColumnSchema) -> RowRecord {
        let mut record = RowRecord::new(id);
        for (key, json) in self.fields {
            let key = ColumnKey::new(key);
            let value = match schema.by_key(&key) {
                Some(column) => coerce(json, column.column_type),
                None => json_value_to_value(json),
            };
            if !value.is_null() {
                record.values.insert(key, value);
            }
        }
        record
    }
}

impl<'de> Deserialize<'de> for RawRow {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RawRowVisitor)
    }
}

struct RawRowVisitor;

impl<'de> Visitor<'de> for RawRowVisitor {
    type Value = RawRow;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map representing a table row")
    }

    fn visit_map<M>(self, mut map: M) -> Result<RawRow, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut row = RawRow::default();

        while let Some(key) = map.next_key::<String>()? {
            let value: Json = map.next_value()?;
            if key == "id" {
                row.id = scalar_key(&value);
            } else {
                row.fields.insert(key, value);
            }
        }

        Ok(row)
    }
}

/// Reads a string or integral number as an identifier.
fn scalar_key(json: &Json) -> Option<String> {
    match json {
        Json::String(s) => Some(s.clone()),
        Json::Number(n) => n
            .as_i64()
            .map(|i| i.to_string())
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| (f as i64).to_string())),
        _ => None,
    }
}

/// Reads an array, a comma separated string or a single scalar as a list of ids.
fn key_list(json: &Json) -> Option<Vec<String>> {
    match json {
        Json::Array(items) => items.iter().map(scalar_key).collect(),
        Json::String(s) => Some(
            s.split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(str::to_string)
                .collect(),
        ),
        other => scalar_key(other).map(|id| vec![id]),
    }
}

/// Coerces a raw JSON value into the value shape of a column type.
pub(crate) fn coerce(json: Json, column_type: ColumnType) -> CellValue {
    if json.is_null() {
        return CellValue::Null;
    }

    let typed = match (column_type, &json) {
        (ColumnType::Text | ColumnType::Link, Json::String(s)) => Some(CellValue::Text(s.clone())),
        (ColumnType::Number, Json::Number(n)) => n.as_f64().map(CellValue::Number),
        (ColumnType::Number, Json::String(s)) => parse::parse_number(s).map(CellValue::Number),
        (ColumnType::Integer, Json::Number(n)) => n
            .as_i64()
            .or_else(|| parse::parse_integer(&n.to_string()))
            .map(CellValue::Integer),
        (ColumnType::Integer, Json::String(s)) => parse::parse_integer(s).map(CellValue::Integer),
        (ColumnType::Currency, Json::Number(n)) => parse::parse_currency(&n.to_string())
            .or_else(|| n.as_f64().and_then(parse::money_from_f64))
            .map(CellValue::Currency),
        (ColumnType::Currency, Json::String(s)) => parse::parse_currency(s).map(CellValue::Currency),
        (ColumnType::Boolean, Json::Bool(b)) => Some(CellValue::Bool(*b)),
        (ColumnType::Boolean, Json::String(s)) => parse::parse_bool(s).map(CellValue::Bool),
        (ColumnType::Boolean, Json::Number(n)) => match n.as_i64() {
            Some(0) => Some(CellValue::Bool(false)),
            Some(1) => Some(CellValue::Bool(true)),
            _ => None,
        },
        (ColumnType::Date, Json::String(s)) => parse::parse_date(s)
            .or_else(|| parse::parse_datetime(s).map(|dt| dt.date_naive()))
            .map(CellValue::Date),
        (ColumnType::DateTime, Json::String(s)) => parse::parse_datetime(s).map(CellValue::DateTime),
        (ColumnType::Choice, other) => scalar_key(other).map(CellValue::Choice),
        (ColumnType::Reference, other) => scalar_key(other).map(CellValue::Reference),
        (ColumnType::ChoiceList, other) => key_list(other).map(CellValue::ChoiceList),
        (ColumnType::ReferenceList, other) => key_list(other).map(CellValue::ReferenceList),
        (ColumnType::Attachment, Json::String(s)) if s.is_empty() => Some(CellValue::Null),
        (ColumnType::Attachment, Json::String(s)) => Some(CellValue::Attachments(vec![s.clone()])),
        (ColumnType::Attachment, Json::Array(items)) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect::<Option<Vec<_>>>()
            .map(CellValue::Attachments),
        (ColumnType::Formula, Json::String(s)) => {
            Some(CellValue::Formula(s.trim().trim_start_matches('=').to_string()))
        }
        _ => None,
    };

    typed.unwrap_or_else(|| {
        log::debug!("Keeping {} value as text for {} column", json, column_type);
        as_text(json)
    })
}

/// Keeps any JSON value as text.
fn as_text(json: Json) -> CellValue {
    match json {
        Json::Null => CellValue::Null,
        Json::String(s) => CellValue::Text(s),
        other => CellValue::Text(other.to_string()),
    }
}

/// Converts a JSON value for a key that has no column.
fn json_value_to_value(json: Json) -> CellValue {
    match json {
        Json::Null => CellValue::Null,
        Json::Bool(b) => CellValue::Bool(b),
        Json::Number(n) => match n.as_i64() {
            Some(i) => CellValue::Integer(i),
            None => n.as_f64().map(CellValue::Number).unwrap_or_default(),
        },
        other => as_text(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ColumnDescriptor;

    fn schema() -> ColumnSchema {
        ColumnSchema::new(vec![
            ColumnDescriptor::new("customer_id", "Customer", ColumnType::Reference),
            ColumnDescriptor::new("amount", "Amount", ColumnType::Currency),
            ColumnDescriptor::new("count", "Count", ColumnType::Integer),
            ColumnDescriptor::new("total", "Total", ColumnType::Formula),
            ColumnDescriptor::new("tags", "Tags", ColumnType::ChoiceList),
        ])
    }

    #[test]
    fn test_deserialize_numeric_id() {
        let raw: RawRow = serde_json::from_str(r#"{"id": 7, "count": 3}"#).unwrap();
        assert_eq!(raw.id(), Some("7"));
        assert_eq!(raw.field("count"), Some(&Json::from(3)));
    }

    #[test]
    fn test_deserialize_missing_id() {
        let raw: RawRow = serde_json::from_str(r#"{"count": 3}"#).unwrap();
        assert_eq!(raw.id(), None);
        let raw: RawRow = serde_json::from_str(r#"{"id": "", "count": 3}"#).unwrap();
        assert_eq!(raw.id(), None);
    }

    #[test]
    fn test_coerce_against_schema() {
        let raw: RawRow = serde_json::from_str(
            r#"{
                "id": "r1",
                "customer_id": 1,
                "amount": "$1,250.5",
                "count": 3.0,
                "total": "=SUM(amount)",
                "tags": "a, b"
            }"#,
        )
        .unwrap();
        let row = raw.into_record(RowId::new("r1"), &schema());

        assert_eq!(row.value("customer_id"), CellValue::Reference("1".into()));
        assert_eq!(row.value("amount").to_text(), "1250.50");
        assert_eq!(row.value("count"), CellValue::Integer(3));
        assert_eq!(row.value("total"), CellValue::Formula("SUM(amount)".into()));
        assert_eq!(
            row.value("tags"),
            CellValue::ChoiceList(vec!["a".into(), "b".into()])
        );
    }

    #[test]
    fn test_uncoercible_value_kept_as_text() {
        let raw: RawRow = serde_json::from_str(r#"{"id": "r1", "count": "many", "extra": true}"#).unwrap();
        let row = raw.into_record(RowId::new("r1"), &schema());
        assert_eq!(row.value("count"), CellValue::Text("many".into()));
        assert_eq!(row.value("extra"), CellValue::Bool(true));
    }

    #[test]
    fn test_serialize_flat_map() {
        let row = RowRecord::new("r1")
            .set("name", "Alice")
            .set("total", CellValue::Formula("SUM(a)".into()))
            .set("empty", CellValue::Null);

        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"id":"r1","name":"Alice","total":"=SUM(a)"}"#);
    }
}
