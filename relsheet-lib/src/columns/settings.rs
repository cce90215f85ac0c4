//! Column settings panel

use serde::Deserialize;
use serde::Serialize;

use crate::model::ColumnDescriptor;
use crate::model::ColumnType;
use crate::model::TableData;
use crate::model::types::OptionSet;

/// Editable part of a column, as the settings panel sends it back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsDraft {
    pub label: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    #[serde(default)]
    pub choices: OptionSet,
    #[serde(default)]
    pub reference_data: OptionSet,
    #[serde(default)]
    pub formula: Option<String>,
}

impl From<&ColumnDescriptor> for SettingsDraft {
    fn from(column: &ColumnDescriptor) -> Self {
        Self {
            label: column.label.clone(),
            column_type: column.column_type,
            choices: column.choices.clone(),
            reference_data: column.reference_data.clone(),
            formula: column.formula.clone(),
        }
    }
}

impl SettingsDraft {
    /// Applies the draft on top of `column`.
    ///
    /// A blank label keeps the old one, and metadata that does not belong to
    /// the chosen type is dropped.
    pub fn apply_to(&self, column: &ColumnDescriptor) -> ColumnDescriptor {
        let label = self.label.trim();
        let column_type = self.column_type;
        ColumnDescriptor {
            key: column.key.clone(),
            label: if label.is_empty() {
                column.label.clone()
            } else {
                label.to_string()
            },
            column_type,
            width: column.width,
            read_only: column.read_only,
            choices: if column_type.is_choice() {
                self.choices.clone()
            } else {
                OptionSet::default()
            },
            reference_data: if column_type.is_reference() {
                self.reference_data.clone()
            } else {
                OptionSet::default()
            },
            formula: if column_type == ColumnType::Formula {
                self.formula
                    .as_deref()
                    .map(str::trim)
                    .filter(|expr| !expr.is_empty())
                    .map(str::to_string)
            } else {
                None
            },
        }
    }
}

/// Result of saving the settings panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingsOutcome {
    Saved,
    Unchanged,
    /// The target column is not in the schema, e.g. the fallback column.
    TargetMissing,
    NotOpen,
}

/// Coordinates the column settings panel with the grid.
#[derive(Debug, Clone, Default)]
pub struct ColumnSettings {
    target: Option<ColumnDescriptor>,
    draft: Option<SettingsDraft>,
}

impl ColumnSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.target.is_some()
    }

    /// The column the panel shows.
    pub fn target(&self) -> Option<&ColumnDescriptor> {
        self.target.as_ref()
    }

    pub fn draft(&self) -> Option<&SettingsDraft> {
        self.draft.as_ref()
    }

    /// Opens the panel on `column`, or on `fallback` when nothing is focused.
    pub fn open(&mut self, column: Option<&ColumnDescriptor>, fallback: &ColumnDescriptor) {
        let target = column.unwrap_or(fallback).clone();
        log::debug!("Settings panel opened on '{}'", target.key);
        self.retarget(target);
    }

    /// Follows a newly highlighted column while the panel is open.
    pub fn follow(&mut self, column: &ColumnDescriptor, rename_open: bool) -> bool {
        if rename_open || self.target.as_ref().is_none_or(|t| t.key == column.key) {
            return false;
        }
        self.retarget(column.clone());
        true
    }

    /// Keeps the shown target in step with the schema without touching the draft.
    pub fn refresh(&mut self, table: &TableData) {
        let Some(target) = self.target.as_mut() else {
            return;
        };
        if let Some(current) = table.columns().by_key(&target.key) {
            *target = current.clone();
        }
    }

    pub fn update_draft(&mut self, draft: SettingsDraft) -> bool {
        if !self.is_open() {
            return false;
        }
        self.draft = Some(draft);
        true
    }

    /// Applies the draft as one column replacement and closes the panel.
    pub fn save(&mut self, table: &mut TableData) -> SettingsOutcome {
        let (Some(target), Some(draft)) = (self.target.take(), self.draft.take()) else {
            return SettingsOutcome::NotOpen;
        };
        let Some(current) = table.columns().by_key(&target.key) else {
            log::warn!("Settings target '{}' is not in the schema", target.key);
            return SettingsOutcome::TargetMissing;
        };

        let updated = draft.apply_to(current);
        if &updated == current {
            return SettingsOutcome::Unchanged;
        }
        match table.columns().with_replaced(updated) {
            Some(columns) => {
                table.replace_columns(columns);
                log::debug!("Saved settings for column '{}'", target.key);
                SettingsOutcome::Saved
            }
            None => SettingsOutcome::TargetMissing,
        }
    }

    /// Closes the panel without applying the draft.
    pub fn cancel(&mut self) -> bool {
        self.draft = None;
        self.target.take().is_some()
    }

    fn retarget(&mut self, target: ColumnDescriptor) {
        self.draft = Some(SettingsDraft::from(&target));
        self.target = Some(target);
    }
}
