//! Context menu sessions

use serde::Deserialize;
use serde::Serialize;

use super::ContextCommand;
use crate::model::ColumnKey;
use crate::model::RowId;
use crate::model::TableData;

/// Where the context menu was opened.
///
/// `row` is `None` for the header row, which makes the menu column-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextMenuTarget {
    #[serde(default)]
    pub row: Option<usize>,
    pub col: usize,
}

impl ContextMenuTarget {
    pub fn cell(row: usize, col: usize) -> Self {
        Self { row: Some(row), col }
    }

    pub fn header(col: usize) -> Self {
        Self { row: None, col }
    }
}

/// An entry of the context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuAction {
    InsertRowAbove,
    InsertRowBelow,
    DuplicateRow,
    DeleteRow,
    InsertColumnLeft,
    InsertColumnRight,
    DeleteColumn,
    RenameColumn,
    HideColumn,
    SortAscending,
    SortDescending,
    FilterColumn,
}

impl MenuAction {
    pub const ROW_ACTIONS: [MenuAction; 4] = [
        MenuAction::InsertRowAbove,
        MenuAction::InsertRowBelow,
        MenuAction::DuplicateRow,
        MenuAction::DeleteRow,
    ];

    pub const COLUMN_ACTIONS: [MenuAction; 8] = [
        MenuAction::InsertColumnLeft,
        MenuAction::InsertColumnRight,
        MenuAction::DeleteColumn,
        MenuAction::RenameColumn,
        MenuAction::HideColumn,
        MenuAction::SortAscending,
        MenuAction::SortDescending,
        MenuAction::FilterColumn,
    ];

    pub fn is_row_action(&self) -> bool {
        Self::ROW_ACTIONS.contains(self)
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::InsertRowAbove => "Insert row above",
            MenuAction::InsertRowBelow => "Insert row below",
            MenuAction::DuplicateRow => "Duplicate row",
            MenuAction::DeleteRow => "Delete row",
            MenuAction::InsertColumnLeft => "Insert column left",
            MenuAction::InsertColumnRight => "Insert column right",
            MenuAction::DeleteColumn => "Delete column",
            MenuAction::RenameColumn => "Rename column",
            MenuAction::HideColumn => "Hide column",
            MenuAction::SortAscending => "Sort ascending",
            MenuAction::SortDescending => "Sort descending",
            MenuAction::FilterColumn => "Filter column",
        }
    }
}

/// An open context menu.
///
/// The menu pins the row id and column key under the pointer when it opens.
/// Actions are resolved against those identities, so a row that moved in the
/// meantime is still the one affected, and a row that is gone is left alone.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextMenu {
    target: ContextMenuTarget,
    row_id: Option<RowId>,
    column_key: Option<ColumnKey>,
}

impl ContextMenu {
    /// Opens a menu on `target`, capturing the identities under it.
    pub fn open(target: ContextMenuTarget, table: &TableData) -> Self {
        let row_id = target
            .row
            .and_then(|row| table.rows().get(row))
            .map(|row| row.id().clone());
        let column_key = table.column_at(target.col).map(|c| c.key.clone());
        Self {
            target,
            row_id,
            column_key,
        }
    }

    pub fn target(&self) -> ContextMenuTarget {
        self.target
    }

    pub fn row_id(&self) -> Option<&RowId> {
        self.row_id.as_ref()
    }

    pub fn column_key(&self) -> Option<&ColumnKey> {
        self.column_key.as_ref()
    }

    /// Entries offered by this menu: header menus have no row entries.
    pub fn actions(&self) -> Vec<MenuAction> {
        let mut actions = Vec::new();
        if self.row_id.is_some() {
            actions.extend(MenuAction::ROW_ACTIONS);
        }
        if self.column_key.is_some() {
            actions.extend(MenuAction::COLUMN_ACTIONS);
        }
        actions
    }

    /// Turns an action into a command against the table as it is now.
    ///
    /// Returns `None` when the captured row or column no longer exists.
    pub fn resolve(&self, action: MenuAction, table: &TableData) -> Option<ContextCommand> {
        if action.is_row_action() {
            let row = self.row_id.as_ref().and_then(|id| table.rows().position(id))?;
            return Some(match action {
                MenuAction::InsertRowAbove => ContextCommand::InsertRowAbove { row },
                MenuAction::InsertRowBelow => ContextCommand::InsertRowBelow { row },
                MenuAction::DuplicateRow => ContextCommand::DuplicateRow { row },
                _ => ContextCommand::DeleteRow { row },
            });
        }

        let col = self
            .column_key
            .as_ref()
            .and_then(|key| table.columns().position(key))
            .map(|index| index + 1)?;
        Some(match action {
            MenuAction::InsertColumnLeft => ContextCommand::InsertColumnLeft { col },
            MenuAction::InsertColumnRight => ContextCommand::InsertColumnRight { col },
            MenuAction::DeleteColumn => ContextCommand::DeleteColumn { col },
            MenuAction::RenameColumn => ContextCommand::RenameColumn { col },
            MenuAction::HideColumn => ContextCommand::HideColumn { col },
            MenuAction::SortAscending => ContextCommand::SortAscending { col },
            MenuAction::SortDescending => ContextCommand::SortDescending { col },
            _ => ContextCommand::FilterColumn { col },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ColumnDescriptor;
    use crate::model::ColumnSchema;
    use crate::model::ColumnType;
    use crate::model::RowRecord;
    use crate::model::RowStore;

    fn table() -> TableData {
        TableData::new(
            "t",
            ColumnSchema::new(vec![ColumnDescriptor::new("name", "Name", ColumnType::Text)]),
            RowStore::new(vec![RowRecord::new("a"), RowRecord::new("b")]),
        )
    }

    #[test]
    fn test_header_menu_has_no_row_actions() {
        let menu = ContextMenu::open(ContextMenuTarget::header(1), &table());
        assert_eq!(menu.actions(), MenuAction::COLUMN_ACTIONS.to_vec());
        assert!(menu.resolve(MenuAction::DeleteRow, &table()).is_none());
    }

    #[test]
    fn test_resolve_follows_moved_row() {
        let mut table = table();
        let menu = ContextMenu::open(ContextMenuTarget::cell(1, 1), &table);

        let rows = table.rows().with_inserted(0, RowRecord::new("c"));
        table.replace_rows(rows);

        assert_eq!(
            menu.resolve(MenuAction::DeleteRow, &table),
            Some(ContextCommand::DeleteRow { row: 2 })
        );
    }

    #[test]
    fn test_resolve_missing_row() {
        let mut table = table();
        let menu = ContextMenu::open(ContextMenuTarget::cell(0, 1), &table);
        let (rows, _) = table.rows().with_removed_id(&RowId::new("a")).unwrap();
        table.replace_rows(rows);
        assert!(menu.resolve(MenuAction::DeleteRow, &table).is_none());
    }

    #[test]
    fn test_gutter_menu_is_row_only() {
        let menu = ContextMenu::open(ContextMenuTarget::cell(0, 0), &table());
        assert_eq!(menu.actions(), MenuAction::ROW_ACTIONS.to_vec());
    }
}
