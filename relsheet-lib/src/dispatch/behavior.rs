//! Per-type cell behavior

use url::Url;

use super::Draft;
use super::DisplayNode;
use super::EditorNode;
use crate::error::ValidationError;
use crate::model::CellValue;
use crate::model::ColumnDescriptor;
use crate::model::ColumnType;
use crate::model::parse;
use crate::model::parse::DATE_FORMAT;
use crate::model::types::Money;
use crate::model::types::OptionSet;

/// How cells of one column type render, edit and validate.
///
/// Resolved from a column with [`CellBehavior::for_column`]. Option families
/// borrow their option set from the column metadata.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellBehavior<'a> {
    Text,
    Number,
    Integer,
    Currency,
    Boolean,
    Date,
    DateTime,
    Choice { options: &'a OptionSet, multi: bool },
    Reference { options: &'a OptionSet, multi: bool },
    Attachment,
    Formula,
    Link,
}

impl<'a> CellBehavior<'a> {
    /// Resolves the behavior of a column.
    ///
    /// A missing column behaves as text, and so does a choice or reference
    /// column without any options to pick from.
    pub fn for_column(column: Option<&'a ColumnDescriptor>) -> Self {
        let Some(column) = column else {
            return CellBehavior::Text;
        };
        match column.column_type {
            ColumnType::Text => CellBehavior::Text,
            ColumnType::Number => CellBehavior::Number,
            ColumnType::Integer => CellBehavior::Integer,
            ColumnType::Currency => CellBehavior::Currency,
            ColumnType::Boolean => CellBehavior::Boolean,
            ColumnType::Date => CellBehavior::Date,
            ColumnType::DateTime => CellBehavior::DateTime,
            ColumnType::Choice | ColumnType::ChoiceList if column.choices.is_empty() => CellBehavior::Text,
            ColumnType::Choice => CellBehavior::Choice {
                options: &column.choices,
                multi: false,
            },
            ColumnType::ChoiceList => CellBehavior::Choice {
                options: &column.choices,
                multi: true,
            },
            ColumnType::Reference | ColumnType::ReferenceList if column.reference_data.is_empty() => {
                CellBehavior::Text
            }
            ColumnType::Reference => CellBehavior::Reference {
                options: &column.reference_data,
                multi: false,
            },
            ColumnType::ReferenceList => CellBehavior::Reference {
                options: &column.reference_data,
                multi: true,
            },
            ColumnType::Attachment => CellBehavior::Attachment,
            ColumnType::Formula => CellBehavior::Formula,
            ColumnType::Link => CellBehavior::Link,
        }
    }

    /// The column type this behavior validates as.
    pub fn column_type(&self) -> ColumnType {
        match self {
            CellBehavior::Text => ColumnType::Text,
            CellBehavior::Number => ColumnType::Number,
            CellBehavior::Integer => ColumnType::Integer,
            CellBehavior::Currency => ColumnType::Currency,
            CellBehavior::Boolean => ColumnType::Boolean,
            CellBehavior::Date => ColumnType::Date,
            CellBehavior::DateTime => ColumnType::DateTime,
            CellBehavior::Choice { multi: false, .. } => ColumnType::Choice,
            CellBehavior::Choice { multi: true, .. } => ColumnType::ChoiceList,
            CellBehavior::Reference { multi: false, .. } => ColumnType::Reference,
            CellBehavior::Reference { multi: true, .. } => ColumnType::ReferenceList,
            CellBehavior::Attachment => ColumnType::Attachment,
            CellBehavior::Formula => ColumnType::Formula,
            CellBehavior::Link => ColumnType::Link,
        }
    }

    fn options(&self) -> Option<(&'a OptionSet, bool)> {
        match *self {
            CellBehavior::Choice { options, multi } | CellBehavior::Reference { options, multi } => {
                Some((options, multi))
            }
            _ => None,
        }
    }

    /// Returns `true` if the editor opens an option popover.
    pub fn has_popover(&self) -> bool {
        self.options().is_some()
    }

    // =========================================================================
    // Render
    // =========================================================================

    /// Builds the display node for a committed value.
    ///
    /// Ids missing from an option set render as `unknown_label`. A value whose
    /// shape does not fit the column type renders as plain text.
    pub fn render(&self, value: &CellValue, unknown_label: &str) -> DisplayNode {
        let node = match (self, value) {
            (CellBehavior::Boolean, CellValue::Null) => Some(DisplayNode::Checkbox(false)),
            (CellBehavior::Attachment, CellValue::Null) => Some(DisplayNode::NoFile),
            (_, CellValue::Null) => Some(DisplayNode::Empty),
            (CellBehavior::Text, _) => None,
            (CellBehavior::Number | CellBehavior::Integer, CellValue::Number(_) | CellValue::Integer(_)) => {
                Some(DisplayNode::Text(value.to_text()))
            }
            (CellBehavior::Currency, CellValue::Currency(m)) => Some(DisplayNode::Text(m.to_string())),
            (CellBehavior::Currency, CellValue::Integer(n)) => Some(DisplayNode::Text(Money::from_int(*n).to_string())),
            (CellBehavior::Currency, CellValue::Number(n)) => {
                parse::money_from_f64(*n).map(|m| DisplayNode::Text(m.to_string()))
            }
            (CellBehavior::Boolean, CellValue::Bool(b)) => Some(DisplayNode::Checkbox(*b)),
            (CellBehavior::Date, CellValue::Date(d)) => Some(DisplayNode::Text(d.format(DATE_FORMAT).to_string())),
            (CellBehavior::Date, CellValue::DateTime(dt)) => {
                Some(DisplayNode::Text(dt.date_naive().format(DATE_FORMAT).to_string()))
            }
            (CellBehavior::DateTime, CellValue::DateTime(dt)) => Some(DisplayNode::Text(dt.to_rfc3339())),
            (CellBehavior::Choice { options, multi } | CellBehavior::Reference { options, multi }, _) => {
                render_options(options, *multi, value, unknown_label)
            }
            (CellBehavior::Attachment, CellValue::Attachments(uris)) if uris.is_empty() => Some(DisplayNode::NoFile),
            (CellBehavior::Attachment, CellValue::Attachments(uris)) => Some(DisplayNode::Attachments(uris.clone())),
            (CellBehavior::Attachment, CellValue::Text(uri)) => Some(DisplayNode::Attachments(vec![uri.clone()])),
            (CellBehavior::Formula, CellValue::Formula(expr)) => Some(DisplayNode::Formula(expr.clone())),
            (CellBehavior::Link, CellValue::Text(url)) => Some(DisplayNode::Link(url.clone())),
            _ => None,
        };

        node.unwrap_or_else(|| plain(value))
    }

    // =========================================================================
    // Edit
    // =========================================================================

    /// Returns the draft an edit session starts from.
    pub fn initial_draft(&self, value: &CellValue) -> Draft {
        match (self, value) {
            (CellBehavior::Boolean, _) => Draft::Toggle(matches!(value, CellValue::Bool(true))),
            (CellBehavior::Choice { .. } | CellBehavior::Reference { .. } | CellBehavior::Attachment, _) => {
                Draft::Selection(value.keys())
            }
            (CellBehavior::Formula, CellValue::Formula(expr)) => Draft::Text(expr.clone()),
            _ => Draft::Text(value.to_text()),
        }
    }

    /// Builds the editor node, seeded with `draft`.
    pub fn editor(&self, draft: &Draft) -> EditorNode {
        match self {
            CellBehavior::Text | CellBehavior::Link => EditorNode::TextInput { value: draft.as_text() },
            CellBehavior::Number | CellBehavior::Integer | CellBehavior::Currency => {
                EditorNode::NumberInput { value: draft.as_text() }
            }
            CellBehavior::Boolean => EditorNode::Checkbox {
                checked: match draft {
                    Draft::Toggle(b) => *b,
                    other => parse::parse_bool(&other.as_text()).unwrap_or(false),
                },
            },
            CellBehavior::Date => EditorNode::DatePicker {
                value: draft.as_text(),
                with_time: false,
            },
            CellBehavior::DateTime => EditorNode::DatePicker {
                value: draft.as_text(),
                with_time: true,
            },
            CellBehavior::Choice { options, multi } | CellBehavior::Reference { options, multi } => {
                let options = options.as_slice().to_vec();
                let selected = draft.entries();
                if *multi {
                    EditorNode::MultiSelect { options, selected }
                } else {
                    EditorNode::Select {
                        options,
                        selected: selected.into_iter().next(),
                    }
                }
            }
            CellBehavior::Attachment => EditorNode::FilePicker { files: draft.entries() },
            CellBehavior::Formula => EditorNode::FormulaInput {
                expression: draft.as_text(),
            },
        }
    }

    // =========================================================================
    // Normalize
    // =========================================================================

    /// Validates a draft and converts it into the value to commit.
    ///
    /// Blank drafts commit as an empty cell.
    pub fn normalize(&self, draft: &Draft) -> Result<CellValue, ValidationError> {
        if draft.is_blank() && !matches!(self, CellBehavior::Boolean) {
            return Ok(CellValue::Null);
        }

        let text = draft.as_text();
        let reject = |reason: &str| ValidationError::new(self.column_type(), text.clone(), reason);

        match self {
            CellBehavior::Text => Ok(CellValue::Text(text.clone())),
            CellBehavior::Number => parse::parse_number(&text)
                .map(CellValue::Number)
                .ok_or_else(|| reject("not a number")),
            CellBehavior::Integer => parse::parse_integer(&text)
                .map(CellValue::Integer)
                .ok_or_else(|| reject("not a whole number")),
            CellBehavior::Currency => parse::parse_currency(&text)
                .map(CellValue::Currency)
                .ok_or_else(|| reject("not an amount")),
            CellBehavior::Boolean => match draft {
                Draft::Toggle(b) => Ok(CellValue::Bool(*b)),
                Draft::Text(s) if s.trim().is_empty() => Ok(CellValue::Bool(false)),
                _ => parse::parse_bool(&text)
                    .map(CellValue::Bool)
                    .ok_or_else(|| reject("not true or false")),
            },
            CellBehavior::Date => parse::parse_date(&text)
                .map(CellValue::Date)
                .ok_or_else(|| reject("expected YYYY-MM-DD")),
            CellBehavior::DateTime => parse::parse_datetime(&text)
                .map(CellValue::DateTime)
                .ok_or_else(|| reject("expected a date and time")),
            CellBehavior::Choice { options, multi } | CellBehavior::Reference { options, multi } => {
                let ids = resolve_all(options, draft).ok_or_else(|| reject("not one of the options"))?;
                let is_choice = matches!(self, CellBehavior::Choice { .. });
                match (*multi, is_choice) {
                    (true, true) => Ok(CellValue::ChoiceList(ids)),
                    (true, false) => Ok(CellValue::ReferenceList(ids)),
                    (false, _) if ids.len() > 1 => Err(reject("only one option can be selected")),
                    (false, true) => Ok(ids.into_iter().next().map(CellValue::Choice).unwrap_or_default()),
                    (false, false) => Ok(ids.into_iter().next().map(CellValue::Reference).unwrap_or_default()),
                }
            }
            CellBehavior::Attachment => {
                let uris = draft.entries();
                if uris.iter().all(|uri| Url::parse(uri).is_ok()) {
                    Ok(CellValue::Attachments(uris))
                } else {
                    Err(reject("not a valid file URL"))
                }
            }
            CellBehavior::Formula => {
                let expr = text.trim().trim_start_matches('=').trim();
                if expr.is_empty() {
                    Err(reject("empty expression"))
                } else {
                    Ok(CellValue::Formula(expr.to_string()))
                }
            }
            CellBehavior::Link => {
                let trimmed = text.trim();
                Url::parse(trimmed)
                    .map(|_| CellValue::Text(trimmed.to_string()))
                    .map_err(|_| reject("not a valid URL"))
            }
        }
    }
}

/// Resolves every entry of a draft against an option set, keeping first occurrences.
fn resolve_all(options: &OptionSet, draft: &Draft) -> Option<Vec<String>> {
    let mut ids: Vec<String> = Vec::new();
    for entry in draft.entries() {
        let item = options.resolve(&entry)?;
        if !ids.contains(&item.id) {
            ids.push(item.id.clone());
        }
    }
    Some(ids)
}

fn render_options(options: &OptionSet, multi: bool, value: &CellValue, unknown_label: &str) -> Option<DisplayNode> {
    let label = |id: &str| {
        options
            .label_for(id)
            .unwrap_or(unknown_label)
            .to_string()
    };
    let ids = value.keys();
    if ids.is_empty() {
        return None;
    }
    if multi {
        Some(DisplayNode::Tags(ids.iter().map(|id| label(id)).collect()))
    } else {
        value.key().map(|id| DisplayNode::Tag(label(&id)))
    }
}

fn plain(value: &CellValue) -> DisplayNode {
    let text = value.to_text();
    if text.is_empty() {
        DisplayNode::Empty
    } else {
        DisplayNode::Text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::OptionItem;

    fn reference() -> ColumnDescriptor {
        ColumnDescriptor::new("customer_id", "Customer", ColumnType::Reference)
            .with_reference_data(vec![OptionItem::new("1", "Alice"), OptionItem::new("2", "Bob")])
    }

    #[test]
    fn test_missing_column_is_text() {
        assert_eq!(CellBehavior::for_column(None), CellBehavior::Text);
    }

    #[test]
    fn test_option_column_without_options_is_text() {
        let column = ColumnDescriptor::new("status", "Status", ColumnType::Choice);
        assert_eq!(CellBehavior::for_column(Some(&column)), CellBehavior::Text);
    }

    #[test]
    fn test_reference_render_resolves_label() {
        let column = reference();
        let behavior = CellBehavior::for_column(Some(&column));
        assert_eq!(
            behavior.render(&CellValue::Integer(1), "Unknown"),
            DisplayNode::Tag("Alice".into())
        );
        assert_eq!(
            behavior.render(&CellValue::Integer(99), "Unknown"),
            DisplayNode::Tag("Unknown".into())
        );
    }

    #[test]
    fn test_render_mismatch_falls_back_to_text() {
        let column = ColumnDescriptor::new("flag", "Flag", ColumnType::Boolean);
        let behavior = CellBehavior::for_column(Some(&column));
        assert_eq!(
            behavior.render(&CellValue::from("maybe"), "Unknown"),
            DisplayNode::Text("maybe".into())
        );
    }

    #[test]
    fn test_normalize_number_rejects_garbage() {
        let err = CellBehavior::Number.normalize(&Draft::from("abc")).unwrap_err();
        assert_eq!(err.column_type, ColumnType::Number);
        assert_eq!(CellBehavior::Number.normalize(&Draft::from(" 2.5 ")), Ok(CellValue::Number(2.5)));
    }

    #[test]
    fn test_normalize_blank_is_null() {
        assert_eq!(CellBehavior::Integer.normalize(&Draft::from("  ")), Ok(CellValue::Null));
        assert_eq!(CellBehavior::Formula.normalize(&Draft::from("")), Ok(CellValue::Null));
    }

    #[test]
    fn test_normalize_reference_by_label() {
        let column = reference();
        let behavior = CellBehavior::for_column(Some(&column));
        assert_eq!(behavior.normalize(&Draft::from("bob")), Ok(CellValue::Reference("2".into())));
        assert!(behavior.normalize(&Draft::from("Carol")).is_err());
        assert!(behavior.normalize(&Draft::Selection(vec!["1".into(), "2".into()])).is_err());
    }

    #[test]
    fn test_normalize_choice_list_dedupes() {
        let column = ColumnDescriptor::new("tags", "Tags", ColumnType::ChoiceList)
            .with_choices(vec![OptionItem::new("a", "Alpha"), OptionItem::new("b", "Beta")]);
        let behavior = CellBehavior::for_column(Some(&column));
        assert_eq!(
            behavior.normalize(&Draft::from("b, alpha, b")),
            Ok(CellValue::ChoiceList(vec!["b".into(), "a".into()]))
        );
    }

    #[test]
    fn test_normalize_formula_and_link() {
        assert_eq!(
            CellBehavior::Formula.normalize(&Draft::from("=SUM(amount)")),
            Ok(CellValue::Formula("SUM(amount)".into()))
        );
        assert!(CellBehavior::Formula.normalize(&Draft::from("=")).is_err());
        assert!(CellBehavior::Link.normalize(&Draft::from("not a url")).is_err());
        assert!(CellBehavior::Attachment.normalize(&Draft::from("https://x.example/a.pdf")).is_ok());
    }

    #[test]
    fn test_boolean_toggle() {
        assert_eq!(CellBehavior::Boolean.normalize(&Draft::Toggle(true)), Ok(CellValue::Bool(true)));
        assert_eq!(CellBehavior::Boolean.initial_draft(&CellValue::Null), Draft::Toggle(false));
    }

    #[test]
    fn test_select_editor_seeded_with_draft() {
        let column = reference();
        let behavior = CellBehavior::for_column(Some(&column));
        let draft = behavior.initial_draft(&CellValue::Reference("2".into()));
        match behavior.editor(&draft) {
            EditorNode::Select { options, selected } => {
                assert_eq!(options.len(), 2);
                assert_eq!(selected.as_deref(), Some("2"));
            }
            other => panic!("unexpected editor {:?}", other),
        }
    }
}
