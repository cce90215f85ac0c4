//! The focus and edit state machine

use super::CellPos;
use super::ClickKind;
use super::CommitOutcome;
use super::CompletionTrigger;
use super::Direction;
use super::EditSession;
use super::Focus;
use super::MachineState;
use super::SessionId;
use crate::dispatch::CellTypeDispatcher;
use crate::dispatch::Draft;
use crate::error::ValidationError;
use crate::model::ColumnKey;
use crate::model::TableData;

/// Owns focus, highlight and the single edit session.
///
/// Every transition that could leave a second session open first completes
/// the current one, so at most one cell is ever in edit mode. Transitions
/// that may commit take the table and dispatcher explicitly.
#[derive(Debug, Default)]
pub struct FocusEditMachine {
    focus: Focus,
    session: Option<EditSession>,
    last_session: u64,
    last_focused_column: Option<ColumnKey>,
}

impl FocusEditMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MachineState {
        match (&self.session, self.focus) {
            (Some(session), _) => MachineState::CellEditing { cell: session.cell },
            (None, Focus::None) => MachineState::Idle,
            (None, Focus::Cell(cell)) => MachineState::CellFocused { cell },
            (None, Focus::Row(row)) => MachineState::RowFocused { row },
            (None, Focus::Column(col)) => MachineState::ColumnHighlighted { col },
        }
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    /// The cell currently in edit mode.
    pub fn editing_cell(&self) -> Option<CellPos> {
        self.session.as_ref().map(|s| s.cell)
    }

    /// Key of the last data column focused through a cell or its header.
    pub fn last_focused_column(&self) -> Option<&ColumnKey> {
        self.last_focused_column.as_ref()
    }

    // =========================================================================
    // Pointer transitions
    // =========================================================================

    /// Click on a cell. Column 0 is treated as a gutter click.
    ///
    /// The cell is focused; it enters edit mode right away on a double click
    /// or when it was already focused.
    pub fn click_cell(
        &mut self,
        cell: CellPos,
        kind: ClickKind,
        table: &mut TableData,
        dispatcher: &CellTypeDispatcher,
    ) -> MachineState {
        if cell.col == 0 {
            return self.click_gutter(cell.row, table, dispatcher);
        }
        if cell.row >= table.row_count() || cell.col >= table.col_count() {
            log::trace!("Click outside grid at {}", cell);
            return self.state();
        }
        if self.editing_cell() == Some(cell) {
            return self.state();
        }

        let was_focused = self.focus == Focus::Cell(cell);
        self.force_complete(table, dispatcher);
        self.focus_cell(cell, table);

        if (was_focused || kind == ClickKind::Double) && table.is_editable(cell.row, cell.col) {
            self.open_session(cell, table, dispatcher);
        }

        log::debug!("Click {:?} on {} -> {}", kind, cell, self.state());
        self.state()
    }

    /// Click on the row-number gutter.
    pub fn click_gutter(&mut self, row: usize, table: &mut TableData, dispatcher: &CellTypeDispatcher) -> MachineState {
        if row >= table.row_count() {
            return self.state();
        }
        self.force_complete(table, dispatcher);
        self.focus = Focus::Row(row);
        log::debug!("Gutter click -> {}", self.state());
        self.state()
    }

    /// Click on a column header. The gutter header is ignored.
    pub fn click_header(&mut self, col: usize, table: &mut TableData, dispatcher: &CellTypeDispatcher) -> MachineState {
        if col == 0 || col >= table.col_count() {
            return self.state();
        }
        self.force_complete(table, dispatcher);
        self.focus = Focus::Column(col);
        self.last_focused_column = table.column_at(col).map(|c| c.key.clone());
        log::debug!("Header click -> {}", self.state());
        self.state()
    }

    // =========================================================================
    // Edit sessions
    // =========================================================================

    /// Starts editing the focused cell.
    pub fn begin_edit(&mut self, table: &mut TableData, dispatcher: &CellTypeDispatcher) -> Option<SessionId> {
        match self.focus {
            Focus::Cell(cell) => self.begin_edit_at(cell, table, dispatcher),
            _ => None,
        }
    }

    /// Starts editing `cell`, completing any session on another cell first.
    ///
    /// Returns the running session when `cell` is already being edited and
    /// `None` when the cell is not editable.
    pub fn begin_edit_at(
        &mut self,
        cell: CellPos,
        table: &mut TableData,
        dispatcher: &CellTypeDispatcher,
    ) -> Option<SessionId> {
        if let Some(session) = self.session.as_ref().filter(|s| s.cell == cell) {
            return Some(session.id);
        }
        if !table.is_editable(cell.row, cell.col) {
            log::debug!("Cell {} is not editable", cell);
            return None;
        }
        self.force_complete(table, dispatcher);
        self.focus_cell(cell, table);
        self.open_session(cell, table, dispatcher)
    }

    /// Replaces the draft of the active session.
    pub fn set_draft(&mut self, draft: Draft) -> Option<SessionId> {
        let session = self.session.as_mut()?;
        session.draft = draft;
        Some(session.id)
    }

    /// Completes session `id`, writing the normalized draft.
    ///
    /// A draft still equal to the one the session opened with is compared
    /// as the committed value and never normalized. A draft that fails validation is returned as an error and the session
    /// stays open. Triggers for a session that already completed report
    /// [`CommitOutcome::AlreadyCompleted`].
    pub fn commit(
        &mut self,
        id: SessionId,
        trigger: CompletionTrigger,
        table: &mut TableData,
        dispatcher: &CellTypeDispatcher,
    ) -> Result<CommitOutcome, ValidationError> {
        let Some(session) = self.session.as_ref().filter(|s| s.id == id) else {
            log::debug!("Ignoring {:?} for completed session {}", trigger, id);
            return Ok(CommitOutcome::AlreadyCompleted);
        };

        let column = table.columns().by_key(&session.key);
        let untouched = session.draft == dispatcher.initial_draft(&session.original, column);
        let value = if untouched {
            session.original.clone()
        } else {
            dispatcher.normalize(&session.draft, column)?
        };

        let Some(session) = self.session.take() else {
            return Ok(CommitOutcome::AlreadyCompleted);
        };
        self.focus = Focus::Cell(session.cell);

        if value.key().as_deref() == Some(session.row_id.as_str()) {
            log::warn!(
                "Suppressed save of row id '{}' into its own column '{}'",
                session.row_id,
                session.key
            );
            return Ok(CommitOutcome::IdentifierCollision);
        }
        if value == session.original {
            log::debug!("Session {} completed by {:?} without change", session.id, trigger);
            return Ok(CommitOutcome::Unchanged);
        }

        match table.rows().with_value(&session.row_id, &session.key, value) {
            Some(rows) => {
                table.replace_rows(rows);
                log::debug!("Session {} saved by {:?} at {}", session.id, trigger, session.cell);
                Ok(CommitOutcome::Saved)
            }
            None => {
                log::warn!("Row '{}' disappeared before its edit was saved", session.row_id);
                Ok(CommitOutcome::Unchanged)
            }
        }
    }

    /// Completes the active session, if any.
    pub fn commit_active(
        &mut self,
        trigger: CompletionTrigger,
        table: &mut TableData,
        dispatcher: &CellTypeDispatcher,
    ) -> Result<CommitOutcome, ValidationError> {
        match self.session.as_ref().map(|s| s.id) {
            Some(id) => self.commit(id, trigger, table, dispatcher),
            None => Ok(CommitOutcome::AlreadyCompleted),
        }
    }

    /// Closes the active session, saving a valid draft and discarding an invalid one.
    pub fn force_complete(&mut self, table: &mut TableData, dispatcher: &CellTypeDispatcher) -> Option<CommitOutcome> {
        let id = self.session.as_ref()?.id;
        match self.commit(id, CompletionTrigger::Forced, table, dispatcher) {
            Ok(outcome) => Some(outcome),
            Err(err) => {
                log::debug!("Discarding session {}: {}", id, err);
                self.session = None;
                None
            }
        }
    }

    /// Discards session `id` and keeps its cell focused.
    pub fn cancel_edit(&mut self, id: SessionId) -> bool {
        match self.session.take_if(|s| s.id == id) {
            Some(session) => {
                self.focus = Focus::Cell(session.cell);
                log::debug!("Session {} cancelled", session.id);
                true
            }
            None => false,
        }
    }

    /// Clears focus and discards any uncommitted edit.
    pub fn escape(&mut self) -> bool {
        if self.state().is_idle() {
            return false;
        }
        if let Some(session) = self.session.take() {
            log::debug!("Session {} discarded by escape", session.id);
        }
        self.focus = Focus::None;
        true
    }

    // =========================================================================
    // Keyboard
    // =========================================================================

    /// Moves cell focus one step, clamped to the grid.
    ///
    /// Only acts while a cell is focused. An open session is completed first.
    pub fn move_focus(
        &mut self,
        direction: Direction,
        table: &mut TableData,
        dispatcher: &CellTypeDispatcher,
    ) -> MachineState {
        let Focus::Cell(cell) = self.focus else {
            return self.state();
        };
        if table.row_count() == 0 {
            return self.state();
        }
        self.force_complete(table, dispatcher);
        let target = cell.step(direction, table.row_count(), table.col_count());
        self.focus_cell(target, table);
        log::trace!("Move {:?} {} -> {}", direction, cell, target);
        self.state()
    }

    // =========================================================================
    // Housekeeping
    // =========================================================================

    /// Drops focus and sessions that no longer fit `table`.
    pub fn reconcile(&mut self, table: &TableData) {
        let rows = table.row_count();
        let cols = table.col_count();

        if let Some(session) = &self.session {
            let row_matches = table.rows().get(session.cell.row).is_some_and(|r| r.id() == &session.row_id);
            let column_matches = table
                .column_at(session.cell.col)
                .is_some_and(|c| c.key == session.key && c.is_editable());
            if !(row_matches && column_matches) {
                log::debug!("Session {} no longer matches the table, discarding", session.id);
                self.session = None;
            }
        }

        self.focus = match self.focus {
            Focus::Cell(cell) if cell.row >= rows || cell.col >= cols => Focus::None,
            Focus::Row(row) if row >= rows => Focus::None,
            Focus::Column(col) if col == 0 || col >= cols => Focus::None,
            other => other,
        };

        if self
            .last_focused_column
            .as_ref()
            .is_some_and(|key| table.columns().position(key).is_none())
        {
            self.last_focused_column = None;
        }
    }

    /// Returns to idle and forgets the last focused column.
    pub fn reset(&mut self) {
        self.focus = Focus::None;
        self.session = None;
        self.last_focused_column = None;
    }

    fn focus_cell(&mut self, cell: CellPos, table: &TableData) {
        self.focus = Focus::Cell(cell);
        if let Some(column) = table.column_at(cell.col) {
            self.last_focused_column = Some(column.key.clone());
        }
    }

    fn open_session(
        &mut self,
        cell: CellPos,
        table: &TableData,
        dispatcher: &CellTypeDispatcher,
    ) -> Option<SessionId> {
        let row = table.rows().get(cell.row)?;
        let column = table.column_at(cell.col)?;
        let original = row.value_of(&column.key);
        let draft = dispatcher.initial_draft(&original, Some(column));

        self.last_session += 1;
        let id = SessionId(self.last_session);
        self.session = Some(EditSession {
            id,
            cell,
            row_id: row.id().clone(),
            key: column.key.clone(),
            original,
            draft,
        });
        log::debug!("Session {} opened at {}", id, cell);
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellValue;
    use crate::model::ColumnDescriptor;
    use crate::model::ColumnSchema;
    use crate::model::ColumnType;
    use crate::model::RowRecord;
    use crate::model::RowStore;

    fn table() -> TableData {
        TableData::new(
            "people",
            ColumnSchema::new(vec![
                ColumnDescriptor::new("name", "Name", ColumnType::Text),
                ColumnDescriptor::new("age", "Age", ColumnType::Integer),
                ColumnDescriptor::new("id_copy", "Locked", ColumnType::Text).read_only(),
            ]),
            RowStore::new(vec![
                RowRecord::new("1").set("name", "bar"),
                RowRecord::new("2").set("name", "Bob"),
            ]),
        )
    }

    #[test]
    fn test_second_click_enters_edit() {
        let mut table = table();
        let dispatcher = CellTypeDispatcher::default();
        let mut machine = FocusEditMachine::new();
        let cell = CellPos::new(0, 1);

        assert!(matches!(
            machine.click_cell(cell, ClickKind::Single, &mut table, &dispatcher),
            MachineState::CellFocused { .. }
        ));
        assert!(machine.click_cell(cell, ClickKind::Single, &mut table, &dispatcher).is_editing());
    }

    #[test]
    fn test_read_only_cell_never_edits() {
        let mut table = table();
        let dispatcher = CellTypeDispatcher::default();
        let mut machine = FocusEditMachine::new();
        let state = machine.click_cell(CellPos::new(0, 3), ClickKind::Double, &mut table, &dispatcher);
        assert_eq!(state, MachineState::CellFocused { cell: CellPos::new(0, 3) });
    }

    #[test]
    fn test_invalid_draft_keeps_session() {
        let mut table = table();
        let dispatcher = CellTypeDispatcher::default();
        let mut machine = FocusEditMachine::new();
        let id = machine.begin_edit_at(CellPos::new(0, 2), &mut table, &dispatcher).unwrap();
        machine.set_draft(Draft::from("old"));

        assert!(machine.commit(id, CompletionTrigger::Enter, &mut table, &dispatcher).is_err());
        assert!(machine.state().is_editing());

        machine.set_draft(Draft::from("42"));
        assert_eq!(
            machine.commit(id, CompletionTrigger::Enter, &mut table, &dispatcher),
            Ok(CommitOutcome::Saved)
        );
        assert_eq!(table.rows().get(0).unwrap().value("age"), CellValue::Integer(42));
    }

    #[test]
    fn test_commit_fires_once() {
        let mut table = table();
        let dispatcher = CellTypeDispatcher::default();
        let mut machine = FocusEditMachine::new();
        let id = machine.begin_edit_at(CellPos::new(1, 1), &mut table, &dispatcher).unwrap();
        machine.set_draft(Draft::from("Bobby"));

        let first = machine.commit(id, CompletionTrigger::Enter, &mut table, &dispatcher);
        let second = machine.commit(id, CompletionTrigger::Blur, &mut table, &dispatcher);
        assert_eq!(first, Ok(CommitOutcome::Saved));
        assert_eq!(second, Ok(CommitOutcome::AlreadyCompleted));
        assert_eq!(table.version(), 1);
    }

    #[test]
    fn test_identifier_collision_is_suppressed() {
        let mut table = table();
        let dispatcher = CellTypeDispatcher::default();
        let mut machine = FocusEditMachine::new();
        let id = machine.begin_edit_at(CellPos::new(1, 1), &mut table, &dispatcher).unwrap();
        machine.set_draft(Draft::from("2"));

        assert_eq!(
            machine.commit(id, CompletionTrigger::Save, &mut table, &dispatcher),
            Ok(CommitOutcome::IdentifierCollision)
        );
        assert_eq!(table.version(), 0);
        assert!(!table.is_dirty());
    }

    #[test]
    fn test_escape_goes_idle_and_cancel_stays_focused() {
        let mut table = table();
        let dispatcher = CellTypeDispatcher::default();
        let mut machine = FocusEditMachine::new();
        let cell = CellPos::new(0, 1);

        let id = machine.begin_edit_at(cell, &mut table, &dispatcher).unwrap();
        assert!(machine.cancel_edit(id));
        assert_eq!(machine.state(), MachineState::CellFocused { cell });

        machine.begin_edit_at(cell, &mut table, &dispatcher).unwrap();
        assert!(machine.escape());
        assert_eq!(machine.state(), MachineState::Idle);
        assert!(!machine.escape());
    }

    #[test]
    fn test_reconcile_clears_out_of_range_focus() {
        let mut table = table();
        let dispatcher = CellTypeDispatcher::default();
        let mut machine = FocusEditMachine::new();
        machine.click_cell(CellPos::new(1, 2), ClickKind::Single, &mut table, &dispatcher);

        table.replace_rows(RowStore::new(vec![RowRecord::new("1")]));
        machine.reconcile(&table);
        assert_eq!(machine.state(), MachineState::Idle);
        assert_eq!(machine.last_focused_column(), Some(&ColumnKey::new("age")));
    }

    fn legacy_table() -> TableData {
        TableData::new(
            "legacy",
            ColumnSchema::new(vec![
                ColumnDescriptor::new("name", "Name", ColumnType::Text),
                ColumnDescriptor::new("count", "Count", ColumnType::Integer),
                ColumnDescriptor::new("tier", "Tier", ColumnType::Choice)
                    .with_choices(vec![crate::model::types::OptionItem::new("gold", "Gold")]),
            ]),
            RowStore::new(vec![
                RowRecord::new("r1")
                    .set("name", "")
                    .set("count", CellValue::Text("many".into()))
                    .set("tier", CellValue::Choice("99".into())),
            ]),
        )
    }

    #[test]
    fn test_untouched_empty_text_is_unchanged() {
        let mut table = legacy_table();
        let dispatcher = CellTypeDispatcher::default();
        let mut machine = FocusEditMachine::new();
        machine.click_cell(CellPos::new(0, 1), ClickKind::Double, &mut table, &dispatcher);

        assert_eq!(
            machine.commit_active(CompletionTrigger::Blur, &mut table, &dispatcher),
            Ok(CommitOutcome::Unchanged)
        );
        assert_eq!(table.version(), 0);
        assert!(!table.is_dirty());
        assert_eq!(table.rows().get(0).unwrap().value("name"), CellValue::Text(String::new()));
    }

    #[test]
    fn test_untouched_stale_values_close_without_validation() {
        let mut table = legacy_table();
        let dispatcher = CellTypeDispatcher::default();
        let mut machine = FocusEditMachine::new();

        for col in [2, 3] {
            let cell = CellPos::new(0, col);
            machine.click_cell(cell, ClickKind::Double, &mut table, &dispatcher);
            assert_eq!(
                machine.commit_active(CompletionTrigger::Enter, &mut table, &dispatcher),
                Ok(CommitOutcome::Unchanged)
            );
            assert_eq!(machine.state(), MachineState::CellFocused { cell });
        }
        assert_eq!(table.version(), 0);

        let id = machine.begin_edit_at(CellPos::new(0, 2), &mut table, &dispatcher).unwrap();
        machine.set_draft(Draft::from("lots"));
        assert!(machine.commit(id, CompletionTrigger::Enter, &mut table, &dispatcher).is_err());
    }

    #[test]
    fn test_last_focused_column_follows_key() {
        let mut table = table();
        let dispatcher = CellTypeDispatcher::default();
        let mut machine = FocusEditMachine::new();
        machine.click_header(2, &mut table, &dispatcher);

        let columns = table
            .columns()
            .with_inserted(0, ColumnDescriptor::new("extra", "Extra", ColumnType::Text));
        table.replace_columns(columns);
        machine.reconcile(&table);
        assert_eq!(machine.last_focused_column(), Some(&ColumnKey::new("age")));

        let columns = ColumnSchema::new(vec![ColumnDescriptor::new("name", "Name", ColumnType::Text)]);
        table.replace_columns(columns);
        machine.reconcile(&table);
        assert_eq!(machine.last_focused_column(), None);
    }
}

