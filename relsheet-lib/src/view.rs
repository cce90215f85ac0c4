//! View model handed to the rendering surface
//!
//! A [`GridView`] is a plain description of what to draw: headers, rows and
//! for every cell either its display node or, for the cell being edited, its
//! editor. The host never reads the table directly.

use serde::Serialize;

use crate::GridConfig;
use crate::dispatch::CellTypeDispatcher;
use crate::dispatch::DisplayNode;
use crate::dispatch::EditorNode;
use crate::grid::CellPos;
use crate::grid::Focus;
use crate::grid::FocusEditMachine;
use crate::model::ColumnKey;
use crate::model::ColumnType;
use crate::model::RowId;
use crate::model::TableData;

/// Label of the gutter header.
pub const GUTTER_LABEL: &str = "#";

/// Width of the gutter for `row_count` rows: eight pixels per digit plus padding.
pub fn gutter_width(row_count: usize) -> u16 {
    let digits = row_count.max(1).ilog10() as u16 + 1;
    digits * 8 + 32
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderView {
    pub col: usize,
    /// `None` for the gutter.
    pub key: Option<ColumnKey>,
    pub label: String,
    pub column_type: Option<ColumnType>,
    pub width: u16,
    pub resizable: bool,
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", content = "node", rename_all = "snake_case")]
pub enum CellContent {
    Display(DisplayNode),
    Editor(EditorNode),
}

impl CellContent {
    pub fn is_editor(&self) -> bool {
        matches!(self, CellContent::Editor(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellView {
    pub col: usize,
    pub focused: bool,
    pub highlighted: bool,
    pub content: CellContent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowView {
    pub id: RowId,
    /// 1-based row number shown in the gutter.
    pub number: usize,
    pub focused: bool,
    pub zebra: bool,
    pub cells: Vec<CellView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridView {
    pub table: String,
    pub version: u64,
    pub headers: Vec<HeaderView>,
    pub rows: Vec<RowView>,
}

impl GridView {
    pub fn build(
        table: &TableData,
        machine: &FocusEditMachine,
        dispatcher: &CellTypeDispatcher,
        config: &GridConfig,
    ) -> Self {
        let focus = machine.focus();
        let highlighted_col = match focus {
            Focus::Column(col) => Some(col),
            _ => None,
        };

        let mut headers = Vec::with_capacity(table.col_count());
        headers.push(HeaderView {
            col: 0,
            key: None,
            label: GUTTER_LABEL.to_string(),
            column_type: None,
            width: gutter_width(table.row_count()),
            resizable: false,
            highlighted: false,
        });
        headers.extend(table.columns().iter().enumerate().map(|(index, column)| HeaderView {
            col: index + 1,
            key: Some(column.key.clone()),
            label: column.label.clone(),
            column_type: Some(column.column_type),
            width: column.width,
            resizable: true,
            highlighted: highlighted_col == Some(index + 1),
        }));

        let rows = table
            .rows()
            .iter()
            .enumerate()
            .map(|(row_index, record)| {
                let mut cells = Vec::with_capacity(table.col_count());
                cells.push(CellView {
                    col: 0,
                    focused: focus == Focus::Cell(CellPos::new(row_index, 0)),
                    highlighted: false,
                    content: CellContent::Display(DisplayNode::Text((row_index + 1).to_string())),
                });

                for (index, column) in table.columns().iter().enumerate() {
                    let pos = CellPos::new(row_index, index + 1);
                    let content = match machine.session().filter(|s| s.cell == pos) {
                        Some(session) => CellContent::Editor(dispatcher.editor_for(&session.draft, Some(column))),
                        None => CellContent::Display(dispatcher.render(&record.value_of(&column.key), Some(column))),
                    };
                    cells.push(CellView {
                        col: pos.col,
                        focused: focus == Focus::Cell(pos),
                        highlighted: highlighted_col == Some(pos.col),
                        content,
                    });
                }

                RowView {
                    id: record.id().clone(),
                    number: row_index + 1,
                    focused: focus == Focus::Row(row_index),
                    zebra: config.zebra_striping && row_index % 2 == 1,
                    cells,
                }
            })
            .collect();

        Self {
            table: table.name().to_string(),
            version: table.version(),
            headers,
            rows,
        }
    }

    /// The cell at a grid position.
    pub fn cell(&self, pos: CellPos) -> Option<&CellView> {
        self.rows.get(pos.row).and_then(|row| row.cells.get(pos.col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gutter_width() {
        assert_eq!(gutter_width(0), 40);
        assert_eq!(gutter_width(9), 40);
        assert_eq!(gutter_width(10), 48);
        assert_eq!(gutter_width(1234), 64);
    }
}
