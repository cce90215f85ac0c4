//! Inline column rename

use serde::Serialize;

use crate::input::Anchor;
use crate::model::ColumnKey;
use crate::model::TableData;

/// The open rename popover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameState {
    pub col: usize,
    pub key: ColumnKey,
    pub anchor: Anchor,
    pub draft: String,
}

/// Result of committing a rename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "label", rename_all = "snake_case")]
pub enum RenameOutcome {
    Renamed(String),
    /// Blank draft, same label, or the column is gone.
    Unchanged,
    NotOpen,
}

/// Coordinates the rename popover.
///
/// While open, keyboard navigation is suppressed. Commit and cancel both
/// close the popover.
#[derive(Debug, Clone, Default)]
pub struct RenameCoordinator {
    state: Option<RenameState>,
}

impl RenameCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.state.is_some()
    }

    pub fn state(&self) -> Option<&RenameState> {
        self.state.as_ref()
    }

    /// Opens the popover for grid column `col`, seeded with its label.
    ///
    /// The gutter and out-of-range columns are refused.
    pub fn open(&mut self, col: usize, anchor: Anchor, table: &TableData) -> bool {
        let Some(column) = table.column_at(col) else {
            log::debug!("Refusing to rename column {}", col);
            return false;
        };
        self.state = Some(RenameState {
            col,
            key: column.key.clone(),
            anchor,
            draft: column.label.clone(),
        });
        true
    }

    pub fn set_draft(&mut self, draft: impl Into<String>) -> bool {
        match self.state.as_mut() {
            Some(state) => {
                state.draft = draft.into();
                true
            }
            None => false,
        }
    }

    /// Applies the trimmed draft as the new label and closes.
    pub fn commit(&mut self, table: &mut TableData) -> RenameOutcome {
        let Some(state) = self.state.take() else {
            return RenameOutcome::NotOpen;
        };
        let label = state.draft.trim();
        if label.is_empty() {
            return RenameOutcome::Unchanged;
        }

        let Some(column) = table.columns().by_key(&state.key) else {
            log::warn!("Column '{}' was removed while being renamed", state.key);
            return RenameOutcome::Unchanged;
        };
        if column.label == label {
            return RenameOutcome::Unchanged;
        }

        let mut renamed = column.clone();
        renamed.label = label.to_string();
        match table.columns().with_replaced(renamed) {
            Some(columns) => {
                table.replace_columns(columns);
                log::debug!("Renamed column '{}' to '{}'", state.key, label);
                RenameOutcome::Renamed(label.to_string())
            }
            None => RenameOutcome::Unchanged,
        }
    }

    pub fn cancel(&mut self) -> bool {
        self.state.take().is_some()
    }
}
