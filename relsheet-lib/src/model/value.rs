//! CellValue enum for typed cell contents

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use serde::Serialize;

use super::parse::DATE_FORMAT;
use super::types::Money;

/// A typed value stored in one cell of a row.
///
/// # Type Mapping
///
/// | Column type | Variant |
/// |-------------|---------|
/// | text, link | `Text` |
/// | number | `Number` |
/// | integer | `Integer` |
/// | currency | `Currency` |
/// | boolean | `Bool` |
/// | date | `Date` |
/// | datetime | `DateTime` |
/// | choice / choice_list | `Choice` / `ChoiceList` |
/// | reference / reference_list | `Reference` / `ReferenceList` |
/// | attachment | `Attachments` |
/// | formula | `Formula` |
///
/// Any column may also hold `Null`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Empty cell.
    #[default]
    Null,
    /// Free text.
    Text(String),
    /// Floating point number.
    Number(f64),
    /// Whole number.
    Integer(i64),
    /// Monetary amount.
    Currency(Money),
    /// Boolean flag.
    Bool(bool),
    /// Calendar date.
    Date(NaiveDate),
    /// Timestamp in UTC.
    DateTime(DateTime<Utc>),
    /// Id of one option of a choice column.
    Choice(String),
    /// Ids of several options of a choice column.
    ChoiceList(Vec<String>),
    /// Id of a referenced record.
    Reference(String),
    /// Ids of several referenced records.
    ReferenceList(Vec<String>),
    /// Attachment URIs.
    Attachments(Vec<String>),
    /// Formula expression, without the leading `=`.
    Formula(String),
}

impl CellValue {
    /// Returns `true` if this is an empty cell.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Returns the value as a lookup key, if it is a single scalar identifier.
    ///
    /// `Integer(1)`, `Number(1.0)`, `Text("1")` and `Reference("1")` all yield
    /// `"1"`, so stored ids match option ids regardless of how they were loaded.
    pub fn key(&self) -> Option<String> {
        match self {
            CellValue::Text(s) | CellValue::Choice(s) | CellValue::Reference(s) => Some(s.clone()),
            CellValue::Integer(n) => Some(n.to_string()),
            CellValue::Number(n) if n.is_finite() && n.fract() == 0.0 => Some((*n as i64).to_string()),
            _ => None,
        }
    }

    /// Returns all identifiers held by this value.
    pub fn keys(&self) -> Vec<String> {
        match self {
            CellValue::ChoiceList(ids) | CellValue::ReferenceList(ids) | CellValue::Attachments(ids) => {
                ids.clone()
            }
            other => other.key().into_iter().collect(),
        }
    }

    /// Returns the plain text form of the value, as typed into a text editor.
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Text(s) | CellValue::Choice(s) | CellValue::Reference(s) => s.clone(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Integer(n) => n.to_string(),
            CellValue::Currency(m) => m.to_string(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Date(d) => d.format(DATE_FORMAT).to_string(),
            CellValue::DateTime(dt) => dt.to_rfc3339(),
            CellValue::ChoiceList(ids) | CellValue::ReferenceList(ids) | CellValue::Attachments(ids) => {
                ids.join(", ")
            }
            CellValue::Formula(expr) => format!("={}", expr),
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for CellValue {
    fn from(v: bool) -> Self {
        CellValue::Bool(v)
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Integer(v)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Number(v)
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        CellValue::Text(v)
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        CellValue::Text(v.to_string())
    }
}

impl From<Money> for CellValue {
    fn from(v: Money) -> Self {
        CellValue::Currency(v)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(v: NaiveDate) -> Self {
        CellValue::Date(v)
    }
}

impl From<DateTime<Utc>> for CellValue {
    fn from(v: DateTime<Utc>) -> Self {
        CellValue::DateTime(v)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => CellValue::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_normalizes_numeric_ids() {
        assert_eq!(CellValue::Integer(1).key().as_deref(), Some("1"));
        assert_eq!(CellValue::Number(1.0).key().as_deref(), Some("1"));
        assert_eq!(CellValue::Reference("1".into()).key().as_deref(), Some("1"));
        assert_eq!(CellValue::Number(1.5).key(), None);
        assert_eq!(CellValue::Bool(true).key(), None);
    }

    #[test]
    fn test_to_text() {
        assert_eq!(CellValue::Null.to_text(), "");
        assert_eq!(CellValue::Number(3.0).to_text(), "3");
        assert_eq!(CellValue::Formula("SUM(a)".into()).to_text(), "=SUM(a)");
        assert_eq!(
            CellValue::ChoiceList(vec!["a".into(), "b".into()]).to_text(),
            "a, b"
        );
    }
}
