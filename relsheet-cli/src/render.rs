//! Plain-text rendering of grid views

use std::fmt::Write;

use relsheet_lib::dispatch::EditorNode;
use relsheet_lib::source::SheetSummary;
use relsheet_lib::view::CellContent;
use relsheet_lib::view::CellView;
use relsheet_lib::view::GridView;

const MAX_CELL_CHARS: usize = 32;

fn editor_text(node: &EditorNode) -> String {
    match node {
        EditorNode::TextInput { value } | EditorNode::NumberInput { value } => value.clone(),
        EditorNode::Checkbox { checked: true } => "[x]".to_string(),
        EditorNode::Checkbox { checked: false } => "[ ]".to_string(),
        EditorNode::DatePicker { value, .. } => value.clone(),
        EditorNode::Select { selected, .. } => selected.clone().unwrap_or_default(),
        EditorNode::MultiSelect { selected, .. } => selected.join(", "),
        EditorNode::FilePicker { files } => files.join(", "),
        EditorNode::FormulaInput { expression } => format!("={}", expression),
    }
}

/// Text of one cell. Focused cells are wrapped in `[]`, editors in `{}`.
fn cell_text(cell: &CellView) -> String {
    let text = match &cell.content {
        CellContent::Display(node) => node.text(),
        CellContent::Editor(node) => format!("{{{}}}", editor_text(node)),
    };
    let text = truncate(&text);
    if cell.focused && !cell.content.is_editor() {
        format!("[{}]", text)
    } else {
        text
    }
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= MAX_CELL_CHARS {
        return text.to_string();
    }
    let mut out: String = text.chars().take(MAX_CELL_CHARS - 1).collect();
    out.push('~');
    out
}

/// Renders the grid as an aligned text table.
///
/// Highlighted column headers are prefixed with `*` and a focused row's
/// number with `>`.
pub fn render_grid(view: &GridView) -> String {
    let headers: Vec<String> = view
        .headers
        .iter()
        .map(|h| {
            if h.highlighted {
                format!("*{}", h.label)
            } else {
                h.label.clone()
            }
        })
        .collect();

    let rows: Vec<Vec<String>> = view
        .rows
        .iter()
        .map(|row| {
            row.cells
                .iter()
                .map(|cell| {
                    if cell.col == 0 && row.focused {
                        format!(">{}", cell_text(cell))
                    } else {
                        cell_text(cell)
                    }
                })
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (i, text) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(text.chars().count());
            }
        }
    }

    let mut out = String::new();
    let _ = writeln!(out, "{} (version {})", view.table, view.version);
    push_line(&mut out, &headers, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule, &widths);
    for row in &rows {
        push_line(&mut out, row, &widths);
    }
    if rows.is_empty() {
        out.push_str("(no rows)\n");
    }
    out
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(text, width)| format!("{:<width$}", text, width = *width))
        .collect();
    out.push_str(line.join(" | ").trim_end());
    out.push('\n');
}

/// Renders the sheet list, one sheet per line.
pub fn render_summaries(summaries: &[SheetSummary]) -> String {
    let mut out = String::new();
    for summary in summaries {
        let _ = writeln!(
            out,
            "{}\t{} columns\t{} rows\tby {}",
            summary.name,
            summary.columns,
            summary.rows,
            summary.created_by_label()
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use relsheet_lib::GridConfig;
    use relsheet_lib::Sheet;
    use relsheet_lib::grid::CellPos;
    use relsheet_lib::grid::ClickKind;
    use relsheet_lib::input::PointerEvent;
    use relsheet_lib::model::ColumnDescriptor;
    use relsheet_lib::model::ColumnSchema;
    use relsheet_lib::model::ColumnType;
    use relsheet_lib::model::RowRecord;
    use relsheet_lib::model::RowStore;
    use relsheet_lib::model::TableData;

    fn sheet() -> Sheet {
        let table = TableData::new(
            "people",
            ColumnSchema::new(vec![
                ColumnDescriptor::new("name", "Name", ColumnType::Text),
                ColumnDescriptor::new("active", "Active", ColumnType::Boolean),
            ]),
            RowStore::new(vec![
                RowRecord::new("r1").set("name", "Ada").set("active", true),
                RowRecord::new("r2").set("name", "Alan"),
            ]),
        );
        Sheet::with_table(GridConfig::default(), table)
    }

    #[test]
    fn test_render_grid() {
        let sheet = sheet();
        let text = render_grid(&sheet.view());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "people (version 0)");
        assert_eq!(lines[1], "# | Name | Active");
        assert_eq!(lines[3], "1 | Ada  | [x]");
        assert_eq!(lines[4], "2 | Alan | [ ]");
    }

    #[test]
    fn test_render_markers() {
        let mut sheet = sheet();
        sheet.pointer(PointerEvent::Cell {
            cell: CellPos::new(1, 1),
            kind: ClickKind::Double,
        });
        sheet.set_draft("Grace");
        let text = render_grid(&sheet.view());
        assert!(text.contains("{Grace}"));

        sheet.pointer(PointerEvent::Cell {
            cell: CellPos::new(0, 0),
            kind: ClickKind::Single,
        });
        let text = render_grid(&sheet.view());
        assert!(text.contains(">1"));
        assert!(!text.contains("{Grace}"));
    }

    #[test]
    fn test_truncate_long_text() {
        let long = "x".repeat(40);
        let short = truncate(&long);
        assert_eq!(short.chars().count(), MAX_CELL_CHARS);
        assert!(short.ends_with('~'));
    }
}
