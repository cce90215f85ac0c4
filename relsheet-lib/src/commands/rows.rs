//! Row commands

use super::CommandOutcome;
use super::CommandProcessor;
use crate::model::RowId;
use crate::model::RowRecord;
use crate::model::TableData;

impl CommandProcessor {
    /// Inserts a fresh row at `row + offset`. An empty table always gets its first row.
    pub(super) fn insert_row(&self, table: &mut TableData, row: usize, offset: usize) -> CommandOutcome {
        let count = table.row_count();
        let at = if count == 0 {
            0
        } else if row < count {
            row + offset
        } else {
            return CommandOutcome::NoOp;
        };
        let rows = table.rows().with_inserted(at, RowRecord::fresh());
        table.replace_rows(rows);
        CommandOutcome::Applied
    }

    pub(super) fn duplicate_row(&self, table: &mut TableData, row: usize) -> CommandOutcome {
        let Some(copy) = table.rows().get(row).map(RowRecord::duplicate) else {
            return CommandOutcome::NoOp;
        };
        let rows = table.rows().with_inserted(row + 1, copy);
        table.replace_rows(rows);
        CommandOutcome::Applied
    }

    /// Deletes the row currently at `row`, resolved to its id before removal.
    pub(super) fn delete_row(&self, table: &mut TableData, row: usize) -> CommandOutcome {
        match table.rows().get(row).map(|r| r.id().clone()) {
            Some(id) => self.delete_row_by_id(table, &id),
            None => CommandOutcome::NoOp,
        }
    }

    /// Deletes the row carrying `id`, wherever it is now.
    pub fn delete_row_by_id(&self, table: &mut TableData, id: &RowId) -> CommandOutcome {
        match table.rows().with_removed_id(id) {
            Some((rows, _)) => {
                table.replace_rows(rows);
                CommandOutcome::Applied
            }
            None => CommandOutcome::NoOp,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::commands::CommandOutcome;
    use crate::commands::CommandProcessor;
    use crate::commands::ContextCommand;
    use crate::model::CellValue;
    use crate::model::ColumnSchema;
    use crate::model::RowRecord;
    use crate::model::RowStore;
    use crate::model::TableData;

    fn table(rows: usize) -> TableData {
        let rows = (0..rows)
            .map(|i| RowRecord::new(format!("r{}", i)).set("name", format!("Row {}", i)))
            .collect();
        TableData::new("t", ColumnSchema::default(), RowStore::new(rows))
    }

    #[test]
    fn test_insert_above_and_below() {
        let processor = CommandProcessor::default();
        let mut table = table(2);

        processor.execute(&ContextCommand::InsertRowAbove { row: 1 }, &mut table);
        assert_eq!(table.row_count(), 3);
        assert!(table.rows().get(1).unwrap().values().is_empty());
        assert_eq!(table.rows().get(2).unwrap().id().as_str(), "r1");

        processor.execute(&ContextCommand::InsertRowBelow { row: 2 }, &mut table);
        assert_eq!(table.row_count(), 4);
        assert!(table.rows().get(3).unwrap().values().is_empty());
    }

    #[test]
    fn test_insert_into_empty_table() {
        let processor = CommandProcessor::default();
        let mut table = table(0);
        assert_eq!(
            processor.execute(&ContextCommand::InsertRowBelow { row: 5 }, &mut table),
            CommandOutcome::Applied
        );
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_out_of_range_row_commands_are_noops() {
        let processor = CommandProcessor::default();
        let mut table = table(1);
        for command in [
            ContextCommand::InsertRowAbove { row: 1 },
            ContextCommand::DuplicateRow { row: 1 },
            ContextCommand::DeleteRow { row: 1 },
        ] {
            assert_eq!(processor.execute(&command, &mut table), CommandOutcome::NoOp);
        }
        assert_eq!(table.version(), 0);
    }

    #[test]
    fn test_duplicate_copies_values() {
        let processor = CommandProcessor::default();
        let mut table = table(2);
        processor.execute(&ContextCommand::DuplicateRow { row: 0 }, &mut table);

        let original = table.rows().get(0).unwrap();
        let copy = table.rows().get(1).unwrap();
        assert_ne!(original.id(), copy.id());
        assert_eq!(copy.value("name"), CellValue::from("Row 0"));
    }
}
