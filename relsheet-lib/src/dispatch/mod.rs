//! Column type dispatch
//!
//! Maps a column to how its cells render, which editor they open and how a
//! draft is validated. The mapping is total: a missing or unrecognized column
//! type behaves as text.

mod behavior;
mod node;

pub use behavior::*;
pub use node::*;

use crate::GridConfig;
use crate::error::ValidationError;
use crate::model::CellValue;
use crate::model::ColumnDescriptor;

/// Entry point for per-type cell behavior.
///
/// # Example
///
/// ```
/// use relsheet_lib::dispatch::{CellTypeDispatcher, DisplayNode};
/// use relsheet_lib::model::{CellValue, ColumnDescriptor, ColumnType};
/// use relsheet_lib::model::types::OptionItem;
///
/// let dispatcher = CellTypeDispatcher::default();
/// let customer = ColumnDescriptor::new("customer_id", "Customer", ColumnType::Reference)
///     .with_reference_data(vec![OptionItem::new("1", "Alice")]);
///
/// assert_eq!(
///     dispatcher.render(&CellValue::Integer(1), Some(&customer)),
///     DisplayNode::Tag("Alice".into())
/// );
/// ```
#[derive(Debug, Clone)]
pub struct CellTypeDispatcher {
    unknown_label: String,
}

impl Default for CellTypeDispatcher {
    fn default() -> Self {
        Self::new("Unknown")
    }
}

impl CellTypeDispatcher {
    pub fn new(unknown_label: impl Into<String>) -> Self {
        Self {
            unknown_label: unknown_label.into(),
        }
    }

    pub fn from_config(config: &GridConfig) -> Self {
        Self::new(config.unknown_option_label.clone())
    }

    /// Resolves the behavior of a column.
    pub fn behavior<'a>(&self, column: Option<&'a ColumnDescriptor>) -> CellBehavior<'a> {
        CellBehavior::for_column(column)
    }

    /// Builds the display node for a committed value.
    pub fn render(&self, value: &CellValue, column: Option<&ColumnDescriptor>) -> DisplayNode {
        self.behavior(column).render(value, &self.unknown_label)
    }

    /// Builds the editor for a committed value.
    pub fn edit(&self, value: &CellValue, column: Option<&ColumnDescriptor>) -> EditorNode {
        let behavior = self.behavior(column);
        behavior.editor(&behavior.initial_draft(value))
    }

    /// Builds the editor for an in-progress draft.
    pub fn editor_for(&self, draft: &Draft, column: Option<&ColumnDescriptor>) -> EditorNode {
        self.behavior(column).editor(draft)
    }

    /// Returns the draft an edit session starts from.
    pub fn initial_draft(&self, value: &CellValue, column: Option<&ColumnDescriptor>) -> Draft {
        self.behavior(column).initial_draft(value)
    }

    /// Validates a draft and converts it into the value to commit.
    pub fn normalize(&self, draft: &Draft, column: Option<&ColumnDescriptor>) -> Result<CellValue, ValidationError> {
        self.behavior(column).normalize(draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ColumnType;

    #[test]
    fn test_unknown_label_from_config() {
        let config = GridConfig::default().with_unknown_option_label("?");
        let dispatcher = CellTypeDispatcher::from_config(&config);
        let column = ColumnDescriptor::new("status", "Status", ColumnType::Choice)
            .with_choices(vec![crate::model::types::OptionItem::new("a", "A")]);
        assert_eq!(
            dispatcher.render(&CellValue::Choice("z".into()), Some(&column)),
            DisplayNode::Tag("?".into())
        );
    }

    #[test]
    fn test_edit_without_column_is_text_input() {
        let dispatcher = CellTypeDispatcher::default();
        assert_eq!(
            dispatcher.edit(&CellValue::from("bar"), None),
            EditorNode::TextInput { value: "bar".into() }
        );
    }
}
