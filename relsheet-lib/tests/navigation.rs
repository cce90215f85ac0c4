use proptest::prelude::*;
use relsheet_lib::GridConfig;
use relsheet_lib::Sheet;
use relsheet_lib::grid::CellPos;
use relsheet_lib::grid::ClickKind;
use relsheet_lib::grid::MachineState;
use relsheet_lib::input::Key;
use relsheet_lib::input::KeyEvent;
use relsheet_lib::input::PointerEvent;
use relsheet_lib::model::ColumnDescriptor;
use relsheet_lib::model::ColumnSchema;
use relsheet_lib::model::ColumnType;
use relsheet_lib::model::RowRecord;
use relsheet_lib::model::RowStore;
use relsheet_lib::model::TableData;

fn grid(rows: usize, columns: usize) -> Sheet {
    let schema = (0..columns)
        .map(|i| ColumnDescriptor::new(format!("c{}", i), format!("Column {}", i), ColumnType::Text))
        .collect::<Vec<_>>();
    let records = (0..rows).map(|i| RowRecord::new(format!("r{}", i))).collect::<Vec<_>>();
    let table = TableData::new("grid", ColumnSchema::new(schema), RowStore::new(records));
    Sheet::with_table(GridConfig::default(), table)
}

fn arrow() -> impl Strategy<Value = Key> {
    prop_oneof![Just(Key::Up), Just(Key::Down), Just(Key::Left), Just(Key::Right)]
}

// ============================================================================
// Arrow Keys
// ============================================================================

proptest! {
    #[test]
    fn test_arrows_stay_in_bounds(
        rows in 1usize..12,
        columns in 1usize..8,
        start_row in 0usize..12,
        start_col in 1usize..9,
        editing in any::<bool>(),
        keys in prop::collection::vec(arrow(), 0..40),
    ) {
        let mut sheet = grid(rows, columns);
        let start = CellPos::new(start_row % rows, 1 + (start_col - 1) % columns);
        let kind = if editing { ClickKind::Double } else { ClickKind::Single };
        sheet.pointer(PointerEvent::Cell { cell: start, kind });

        for key in keys {
            sheet.key(KeyEvent::new(key));
            let cell = sheet.state().cell();
            prop_assert!(cell.is_some());
            if let Some(cell) = cell {
                prop_assert!(cell.row < rows);
                prop_assert!(cell.col <= columns);
            }
            prop_assert!(!sheet.state().is_editing());
        }
    }

    #[test]
    fn test_at_most_one_editor(
        clicks in prop::collection::vec((0usize..4, 0usize..4, any::<bool>()), 1..20),
    ) {
        let mut sheet = grid(4, 3);
        for (row, col, double) in clicks {
            let kind = if double { ClickKind::Double } else { ClickKind::Single };
            sheet.pointer(PointerEvent::Cell { cell: CellPos::new(row, col), kind });

            let editors = sheet
                .view()
                .rows
                .iter()
                .flat_map(|r| r.cells.iter())
                .filter(|c| c.content.is_editor())
                .count();
            prop_assert!(editors <= 1);
            prop_assert_eq!(editors == 1, sheet.state().is_editing());
        }
    }
}

#[test]
fn test_arrows_ignored_without_cell_focus() {
    let mut sheet = grid(3, 3);
    sheet.pointer(PointerEvent::Cell {
        cell: CellPos::new(1, 0),
        kind: ClickKind::Single,
    });
    sheet.key(KeyEvent::new(Key::Down));
    assert_eq!(sheet.state(), MachineState::RowFocused { row: 1 });
}

#[test]
fn test_arrows_clamp_at_edges() {
    let mut sheet = grid(2, 2);
    sheet.pointer(PointerEvent::Cell {
        cell: CellPos::new(1, 2),
        kind: ClickKind::Single,
    });
    sheet.key(KeyEvent::new(Key::Down));
    sheet.key(KeyEvent::new(Key::Right));
    assert_eq!(sheet.state(), MachineState::CellFocused { cell: CellPos::new(1, 2) });
}
