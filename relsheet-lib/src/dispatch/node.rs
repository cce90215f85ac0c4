//! Display and editor nodes handed to the rendering surface

use serde::Deserialize;
use serde::Serialize;

use crate::model::types::OptionItem;

/// What a cell shows when it is not being edited.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DisplayNode {
    /// Nothing to show.
    Empty,
    /// Plain text.
    Text(String),
    /// A single option label.
    Tag(String),
    /// Several option labels.
    Tags(Vec<String>),
    /// A checkbox.
    Checkbox(bool),
    /// A clickable URL.
    Link(String),
    /// Attachment links.
    Attachments(Vec<String>),
    /// Placeholder for an attachment cell without files.
    NoFile,
    /// A formula expression.
    Formula(String),
}

impl DisplayNode {
    /// Returns a plain text rendering, for hosts without rich widgets.
    pub fn text(&self) -> String {
        match self {
            DisplayNode::Empty => String::new(),
            DisplayNode::Text(s) | DisplayNode::Tag(s) | DisplayNode::Link(s) => s.clone(),
            DisplayNode::Tags(labels) => labels.join(", "),
            DisplayNode::Checkbox(true) => "[x]".to_string(),
            DisplayNode::Checkbox(false) => "[ ]".to_string(),
            DisplayNode::Attachments(uris) => uris
                .iter()
                .map(|uri| file_name(uri))
                .collect::<Vec<_>>()
                .join(", "),
            DisplayNode::NoFile => "No file".to_string(),
            DisplayNode::Formula(expr) => format!("={}", expr),
        }
    }
}

/// Last path segment of an attachment URI.
fn file_name(uri: &str) -> &str {
    uri.trim_end_matches('/').rsplit('/').next().unwrap_or(uri)
}

/// The inline editor for the cell being edited, seeded with the current draft.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EditorNode {
    TextInput { value: String },
    NumberInput { value: String },
    Checkbox { checked: bool },
    DatePicker { value: String, with_time: bool },
    Select { options: Vec<OptionItem>, selected: Option<String> },
    MultiSelect { options: Vec<OptionItem>, selected: Vec<String> },
    FilePicker { files: Vec<String> },
    FormulaInput { expression: String },
}

impl EditorNode {
    /// Returns `true` for editors that open an option popover.
    pub fn has_popover(&self) -> bool {
        matches!(self, EditorNode::Select { .. } | EditorNode::MultiSelect { .. })
    }
}

/// Uncommitted editor contents.
///
/// Text editors produce `Text`, checkboxes produce `Toggle` and option or file
/// pickers produce `Selection`. Any editor also accepts `Text`, which is parsed
/// the way a user would type it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Draft {
    Text(String),
    Toggle(bool),
    Selection(Vec<String>),
}

impl Draft {
    /// Returns `true` if the draft holds nothing.
    pub fn is_blank(&self) -> bool {
        match self {
            Draft::Text(s) => s.trim().is_empty(),
            Draft::Toggle(_) => false,
            Draft::Selection(ids) => ids.iter().all(|id| id.trim().is_empty()),
        }
    }

    /// Returns the draft as typed text.
    pub fn as_text(&self) -> String {
        match self {
            Draft::Text(s) => s.clone(),
            Draft::Toggle(b) => b.to_string(),
            Draft::Selection(ids) => ids.join(", "),
        }
    }

    /// Splits the draft into list entries.
    pub(crate) fn entries(&self) -> Vec<String> {
        match self {
            Draft::Text(s) => s
                .split([',', '\n'])
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(str::to_string)
                .collect(),
            Draft::Toggle(b) => vec![b.to_string()],
            Draft::Selection(ids) => ids
                .iter()
                .map(|id| id.trim())
                .filter(|id| !id.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

impl From<&str> for Draft {
    fn from(text: &str) -> Self {
        Draft::Text(text.to_string())
    }
}

impl From<String> for Draft {
    fn from(text: String) -> Self {
        Draft::Text(text)
    }
}

impl From<bool> for Draft {
    fn from(checked: bool) -> Self {
        Draft::Toggle(checked)
    }
}
