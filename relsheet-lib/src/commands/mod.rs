//! Structural commands from the context menu
//!
//! Every command replaces the row store and/or column schema as a whole;
//! nothing is edited in place. Column indices are grid indices, so the
//! gutter is column 0 and commands naming it do nothing.

mod columns;
mod menu;
mod rows;

pub use menu::*;

use serde::Deserialize;
use serde::Serialize;

use crate::GridConfig;
use crate::model::ColumnKey;
use crate::model::ColumnType;
use crate::model::TableData;

/// A structural command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ContextCommand {
    InsertRowAbove { row: usize },
    InsertRowBelow { row: usize },
    DuplicateRow { row: usize },
    DeleteRow { row: usize },
    InsertColumnLeft { col: usize },
    InsertColumnRight { col: usize },
    DeleteColumn { col: usize },
    RenameColumn { col: usize },
    HideColumn { col: usize },
    SortAscending { col: usize },
    SortDescending { col: usize },
    FilterColumn { col: usize },
    /// Appends a column of the given type.
    AddColumn { column_type: ColumnType },
    /// Sets a column's width, clamped to the configured range.
    ResizeColumn { col: usize, width: u16 },
}

impl ContextCommand {
    pub fn name(&self) -> &'static str {
        match self {
            ContextCommand::InsertRowAbove { .. } => "insert_row_above",
            ContextCommand::InsertRowBelow { .. } => "insert_row_below",
            ContextCommand::DuplicateRow { .. } => "duplicate_row",
            ContextCommand::DeleteRow { .. } => "delete_row",
            ContextCommand::InsertColumnLeft { .. } => "insert_column_left",
            ContextCommand::InsertColumnRight { .. } => "insert_column_right",
            ContextCommand::DeleteColumn { .. } => "delete_column",
            ContextCommand::RenameColumn { .. } => "rename_column",
            ContextCommand::HideColumn { .. } => "hide_column",
            ContextCommand::SortAscending { .. } => "sort_ascending",
            ContextCommand::SortDescending { .. } => "sort_descending",
            ContextCommand::FilterColumn { .. } => "filter_column",
            ContextCommand::AddColumn { .. } => "add_column",
            ContextCommand::ResizeColumn { .. } => "resize_column",
        }
    }
}

/// A request to open the rename popover for a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameRequest {
    pub col: usize,
    pub key: ColumnKey,
    pub label: String,
}

/// Result of executing a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum CommandOutcome {
    /// The table changed.
    Applied,
    /// The target was out of range or the command changed nothing.
    NoOp,
    /// The rename popover should open.
    Rename(RenameRequest),
    /// The command exists but has no implementation yet.
    Unimplemented(&'static str),
}

/// Applies structural commands to a table.
#[derive(Debug, Clone)]
pub struct CommandProcessor {
    config: GridConfig,
}

impl Default for CommandProcessor {
    fn default() -> Self {
        Self::from_config(&GridConfig::default())
    }
}

impl CommandProcessor {
    pub fn from_config(config: &GridConfig) -> Self {
        Self { config: config.clone() }
    }

    /// Executes one command against `table`.
    pub fn execute(&self, command: &ContextCommand, table: &mut TableData) -> CommandOutcome {
        let outcome = match *command {
            ContextCommand::InsertRowAbove { row } => self.insert_row(table, row, 0),
            ContextCommand::InsertRowBelow { row } => self.insert_row(table, row, 1),
            ContextCommand::DuplicateRow { row } => self.duplicate_row(table, row),
            ContextCommand::DeleteRow { row } => self.delete_row(table, row),
            ContextCommand::InsertColumnLeft { col } => self.insert_column(table, col, 0),
            ContextCommand::InsertColumnRight { col } => self.insert_column(table, col, 1),
            ContextCommand::DeleteColumn { col } => self.delete_column(table, col),
            ContextCommand::RenameColumn { col } => self.rename_column(table, col),
            ContextCommand::AddColumn { column_type } => self.add_column(table, column_type),
            ContextCommand::ResizeColumn { col, width } => self.resize_column(table, col, width),
            ContextCommand::HideColumn { .. }
            | ContextCommand::SortAscending { .. }
            | ContextCommand::SortDescending { .. }
            | ContextCommand::FilterColumn { .. } => CommandOutcome::Unimplemented(command.name()),
        };

        match &outcome {
            CommandOutcome::Applied => log::debug!("Applied {:?}, table version {}", command, table.version()),
            CommandOutcome::NoOp => log::debug!("{:?} had no effect", command),
            CommandOutcome::Rename(request) => log::debug!("Rename requested for column {}", request.key),
            CommandOutcome::Unimplemented(name) => log::debug!("Command {} is not implemented", name),
        }
        outcome
    }
}
