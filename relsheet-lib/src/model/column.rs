//! Column descriptors

use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::types::OptionItem;
use super::types::OptionSet;

/// Width given to columns that do not specify one.
pub const DEFAULT_COLUMN_WIDTH: u16 = 160;

/// Stable key of a column.
///
/// Row values are stored under this key. Keys are never reused: fresh keys are
/// UUID based, so a deleted column's key can not come back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnKey(String);

impl ColumnKey {
    /// Creates a key from an existing string.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Allocates a key that has never been used before.
    pub fn fresh() -> Self {
        Self(format!("col_{}", Uuid::new_v4().simple()))
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ColumnKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for ColumnKey {
    fn from(key: String) -> Self {
        Self::new(key)
    }
}

/// Column type enumeration.
///
/// Parsing is lenient: names are matched case-insensitively and anything
/// unrecognized becomes [`ColumnType::Text`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ColumnType {
    /// Free text.
    #[default]
    Text,
    /// Floating point number.
    Number,
    /// Whole number.
    Integer,
    /// Monetary amount.
    Currency,
    /// True/false.
    Boolean,
    /// Calendar date.
    Date,
    /// Date and time.
    DateTime,
    /// One option from a bounded set.
    Choice,
    /// Several options from a bounded set.
    ChoiceList,
    /// Lookup to one record.
    Reference,
    /// Lookup to several records.
    ReferenceList,
    /// File attachments.
    Attachment,
    /// Formula expression.
    Formula,
    /// URL.
    Link,
}

impl ColumnType {
    /// Every column type, in the order the settings panel lists them.
    pub const ALL: [ColumnType; 14] = [
        ColumnType::Text,
        ColumnType::Number,
        ColumnType::Integer,
        ColumnType::Currency,
        ColumnType::Boolean,
        ColumnType::Date,
        ColumnType::DateTime,
        ColumnType::Choice,
        ColumnType::ChoiceList,
        ColumnType::Reference,
        ColumnType::ReferenceList,
        ColumnType::Attachment,
        ColumnType::Formula,
        ColumnType::Link,
    ];

    /// Parses a type name, falling back to text.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "number" => ColumnType::Number,
            "integer" => ColumnType::Integer,
            "currency" => ColumnType::Currency,
            "boolean" => ColumnType::Boolean,
            "date" => ColumnType::Date,
            "datetime" => ColumnType::DateTime,
            "choice" => ColumnType::Choice,
            "choice_list" => ColumnType::ChoiceList,
            "reference" => ColumnType::Reference,
            "reference_list" => ColumnType::ReferenceList,
            "attachment" => ColumnType::Attachment,
            "formula" => ColumnType::Formula,
            "link" => ColumnType::Link,
            "text" => ColumnType::Text,
            other => {
                log::debug!("Unknown column type '{}', using text", other);
                ColumnType::Text
            }
        }
    }

    /// Returns the wire name of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Text => "text",
            ColumnType::Number => "number",
            ColumnType::Integer => "integer",
            ColumnType::Currency => "currency",
            ColumnType::Boolean => "boolean",
            ColumnType::Date => "date",
            ColumnType::DateTime => "datetime",
            ColumnType::Choice => "choice",
            ColumnType::ChoiceList => "choice_list",
            ColumnType::Reference => "reference",
            ColumnType::ReferenceList => "reference_list",
            ColumnType::Attachment => "attachment",
            ColumnType::Formula => "formula",
            ColumnType::Link => "link",
        }
    }

    /// Returns the human-readable name of the type.
    pub fn label(&self) -> &'static str {
        match self {
            ColumnType::Text => "Text",
            ColumnType::Number => "Number",
            ColumnType::Integer => "Integer",
            ColumnType::Currency => "Currency",
            ColumnType::Boolean => "Boolean",
            ColumnType::Date => "Date",
            ColumnType::DateTime => "Date Time",
            ColumnType::Choice => "Choice",
            ColumnType::ChoiceList => "Choice List",
            ColumnType::Reference => "Reference",
            ColumnType::ReferenceList => "Reference List",
            ColumnType::Attachment => "Attachment",
            ColumnType::Formula => "Formula",
            ColumnType::Link => "Link",
        }
    }

    /// Returns true for the choice family.
    pub fn is_choice(&self) -> bool {
        matches!(self, ColumnType::Choice | ColumnType::ChoiceList)
    }

    /// Returns true for the reference family.
    pub fn is_reference(&self) -> bool {
        matches!(self, ColumnType::Reference | ColumnType::ReferenceList)
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ColumnType {
    fn from(name: String) -> Self {
        Self::parse(&name)
    }
}

impl From<ColumnType> for String {
    fn from(column_type: ColumnType) -> Self {
        column_type.as_str().to_string()
    }
}

fn default_width() -> u16 {
    DEFAULT_COLUMN_WIDTH
}

/// Describes one column of the schema.
///
/// The column's position is its index in the [`ColumnSchema`](super::ColumnSchema).
///
/// # Example
///
/// ```
/// use relsheet_lib::model::{ColumnDescriptor, ColumnType};
/// use relsheet_lib::model::types::OptionItem;
///
/// let status = ColumnDescriptor::new("shipment_status", "Status", ColumnType::Choice)
///     .with_choices(vec![OptionItem::new("pending", "Pending")]);
/// assert!(status.options().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Stable key.
    pub key: ColumnKey,

    /// Display label.
    pub label: String,

    /// Column type.
    #[serde(rename = "type", default)]
    pub column_type: ColumnType,

    /// Display width in pixels.
    #[serde(default = "default_width")]
    pub width: u16,

    /// Read-only columns never enter edit mode.
    #[serde(default)]
    pub read_only: bool,

    /// Options for choice columns.
    #[serde(default, skip_serializing_if = "OptionSet::is_empty")]
    pub choices: OptionSet,

    /// Referenced records for reference columns.
    #[serde(default, skip_serializing_if = "OptionSet::is_empty")]
    pub reference_data: OptionSet,

    /// Expression for formula columns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
}

impl ColumnDescriptor {
    /// Creates a new column with the default width and no metadata.
    pub fn new(key: impl Into<ColumnKey>, label: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            column_type,
            width: DEFAULT_COLUMN_WIDTH,
            read_only: false,
            choices: OptionSet::default(),
            reference_data: OptionSet::default(),
            formula: None,
        }
    }

    /// Creates a column with a fresh, never used key.
    pub fn fresh(label: impl Into<String>, column_type: ColumnType) -> Self {
        Self::new(ColumnKey::fresh(), label, column_type)
    }

    /// Sets the choice options (builder pattern).
    pub fn with_choices(mut self, choices: Vec<OptionItem>) -> Self {
        self.choices = choices.into();
        self
    }

    /// Sets the reference data (builder pattern).
    pub fn with_reference_data(mut self, records: Vec<OptionItem>) -> Self {
        self.reference_data = records.into();
        self
    }

    /// Sets the formula expression (builder pattern).
    pub fn with_formula(mut self, expression: impl Into<String>) -> Self {
        self.formula = Some(expression.into());
        self
    }

    /// Sets the display width (builder pattern).
    pub fn with_width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    /// Marks the column read-only (builder pattern).
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Returns `true` if cells of this column can enter edit mode.
    pub fn is_editable(&self) -> bool {
        !self.read_only
    }

    /// Returns the option set relevant to this column's type, if it has one.
    pub fn options(&self) -> Option<&OptionSet> {
        if self.column_type.is_choice() {
            Some(&self.choices)
        } else if self.column_type.is_reference() {
            Some(&self.reference_data)
        } else {
            None
        }
    }
}
