//! Column commands

use super::CommandOutcome;
use super::CommandProcessor;
use super::RenameRequest;
use crate::model::ColumnDescriptor;
use crate::model::ColumnType;
use crate::model::TableData;

impl CommandProcessor {
    /// Inserts a text column at schema index `col - 1 + offset`.
    pub(super) fn insert_column(&self, table: &mut TableData, col: usize, offset: usize) -> CommandOutcome {
        if table.column_at(col).is_none() {
            return CommandOutcome::NoOp;
        }
        let column = ColumnDescriptor::fresh(self.config.new_column_label.clone(), ColumnType::Text)
            .with_width(self.config.default_column_width);
        let columns = table.columns().with_inserted(col - 1 + offset, column);
        table.replace_columns(columns);
        CommandOutcome::Applied
    }

    /// Removes a column and its key from every row.
    pub(super) fn delete_column(&self, table: &mut TableData, col: usize) -> CommandOutcome {
        let Some((columns, removed)) = col.checked_sub(1).and_then(|index| table.columns().with_removed(index)) else {
            return CommandOutcome::NoOp;
        };
        let rows = table.rows().without_column(&removed.key);
        table.replace_both(columns, rows);
        CommandOutcome::Applied
    }

    pub(super) fn rename_column(&self, table: &TableData, col: usize) -> CommandOutcome {
        match table.column_at(col) {
            Some(column) => CommandOutcome::Rename(RenameRequest {
                col,
                key: column.key.clone(),
                label: column.label.clone(),
            }),
            None => CommandOutcome::NoOp,
        }
    }

    /// Appends a column of `column_type` labelled after its type.
    pub(super) fn add_column(&self, table: &mut TableData, column_type: ColumnType) -> CommandOutcome {
        let label = format!("New {} Column", column_type.label());
        let column = ColumnDescriptor::fresh(label, column_type).with_width(self.config.default_column_width);
        let columns = table.columns().with_inserted(table.columns().len(), column);
        table.replace_columns(columns);
        CommandOutcome::Applied
    }

    pub(super) fn resize_column(&self, table: &mut TableData, col: usize, width: u16) -> CommandOutcome {
        let Some(column) = table.column_at(col) else {
            return CommandOutcome::NoOp;
        };
        let width = self.config.clamp_width(width);
        if column.width == width {
            return CommandOutcome::NoOp;
        }
        let resized = column.clone().with_width(width);
        match table.columns().with_replaced(resized) {
            Some(columns) => {
                table.replace_columns(columns);
                CommandOutcome::Applied
            }
            None => CommandOutcome::NoOp,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::GridConfig;
    use crate::commands::CommandOutcome;
    use crate::commands::CommandProcessor;
    use crate::commands::ContextCommand;
    use crate::model::ColumnDescriptor;
    use crate::model::ColumnKey;
    use crate::model::ColumnSchema;
    use crate::model::ColumnType;
    use crate::model::RowRecord;
    use crate::model::RowStore;
    use crate::model::TableData;

    fn table() -> TableData {
        TableData::new(
            "orders",
            ColumnSchema::new(vec![
                ColumnDescriptor::new("order_id", "Order ID", ColumnType::Text),
                ColumnDescriptor::new("amount", "Amount", ColumnType::Currency),
            ]),
            RowStore::new(vec![RowRecord::new("1").set("order_id", "ORD-1").set("amount", 5i64)]),
        )
    }

    #[test]
    fn test_insert_left_and_right() {
        let processor = CommandProcessor::default();
        let mut table = table();

        processor.execute(&ContextCommand::InsertColumnLeft { col: 1 }, &mut table);
        assert_eq!(table.column_at(1).map(|c| c.label.as_str()), Some("New Column"));
        assert_eq!(table.column_at(2).map(|c| c.key.as_str()), Some("order_id"));

        processor.execute(&ContextCommand::InsertColumnRight { col: 3 }, &mut table);
        assert_eq!(table.col_count(), 5);
        assert_eq!(table.column_at(4).map(|c| c.label.as_str()), Some("New Column"));
        assert!(table.rows().get(0).unwrap().values().len() == 2);
    }

    #[test]
    fn test_gutter_column_commands_are_noops() {
        let processor = CommandProcessor::default();
        let mut table = table();
        for command in [
            ContextCommand::InsertColumnLeft { col: 0 },
            ContextCommand::DeleteColumn { col: 0 },
            ContextCommand::RenameColumn { col: 0 },
            ContextCommand::ResizeColumn { col: 0, width: 200 },
            ContextCommand::DeleteColumn { col: 3 },
        ] {
            assert_eq!(processor.execute(&command, &mut table), CommandOutcome::NoOp);
        }
    }

    #[test]
    fn test_delete_column_cascades_to_rows() {
        let processor = CommandProcessor::default();
        let mut table = table();
        processor.execute(&ContextCommand::DeleteColumn { col: 2 }, &mut table);
        assert_eq!(table.columns().len(), 1);
        assert!(!table.rows().get(0).unwrap().contains(&ColumnKey::new("amount")));
    }

    #[test]
    fn test_add_column_label_follows_type() {
        let processor = CommandProcessor::default();
        let mut table = table();
        processor.execute(&ContextCommand::AddColumn { column_type: ColumnType::DateTime }, &mut table);
        let added = table.column_at(3).unwrap();
        assert_eq!(added.label, "New Date Time Column");
        assert_eq!(added.column_type, ColumnType::DateTime);
    }

    #[test]
    fn test_resize_clamps() {
        let processor = CommandProcessor::from_config(&GridConfig::default().with_width_range(50, 300));
        let mut table = table();
        processor.execute(&ContextCommand::ResizeColumn { col: 1, width: 5000 }, &mut table);
        assert_eq!(table.column_at(1).map(|c| c.width), Some(300));
        assert_eq!(
            processor.execute(&ContextCommand::ResizeColumn { col: 1, width: 301 }, &mut table),
            CommandOutcome::NoOp
        );
    }

    #[test]
    fn test_rename_delegates() {
        let processor = CommandProcessor::default();
        let mut table = table();
        match processor.execute(&ContextCommand::RenameColumn { col: 2 }, &mut table) {
            CommandOutcome::Rename(request) => {
                assert_eq!(request.label, "Amount");
                assert_eq!(request.col, 2);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        assert_eq!(table.version(), 0);
    }

    #[test]
    fn test_sort_is_unimplemented() {
        let processor = CommandProcessor::default();
        let mut table = table();
        assert_eq!(
            processor.execute(&ContextCommand::SortAscending { col: 1 }, &mut table),
            CommandOutcome::Unimplemented("sort_ascending")
        );
    }
}
