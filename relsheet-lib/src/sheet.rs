//! The sheet: one table plus all interaction state around it.

use crate::GridConfig;
use crate::columns::ColumnSettings;
use crate::columns::RenameCoordinator;
use crate::columns::RenameOutcome;
use crate::columns::SettingsDraft;
use crate::columns::SettingsOutcome;
use crate::commands::CommandOutcome;
use crate::commands::CommandProcessor;
use crate::commands::ContextCommand;
use crate::commands::ContextMenu;
use crate::commands::ContextMenuTarget;
use crate::commands::MenuAction;
use crate::dispatch::CellTypeDispatcher;
use crate::dispatch::Draft;
use crate::error::SourceError;
use crate::error::ValidationError;
use crate::grid::CommitOutcome;
use crate::grid::CompletionTrigger;
use crate::grid::FocusEditMachine;
use crate::grid::MachineState;
use crate::grid::SessionId;
use crate::input::Anchor;
use crate::input::KeyEvent;
use crate::input::KeyOutcome;
use crate::input::KeyboardNavigator;
use crate::input::PointerEvent;
use crate::model::TableData;
use crate::source::FetchTicket;
use crate::source::LoadOutcome;
use crate::source::TableFetch;
use crate::source::TableLoader;
use crate::source::TableSource;
use crate::view::GridView;

/// Interaction core for one open table.
///
/// All input goes through here: pointer and key events, editor callbacks,
/// context menu actions, the rename popover and the settings panel. Each call
/// runs to completion synchronously; only [`Sheet::load_table`] awaits.
///
/// # Example
///
/// ```
/// use relsheet_lib::Sheet;
/// use relsheet_lib::GridConfig;
/// use relsheet_lib::grid::{CellPos, ClickKind, CompletionTrigger};
/// use relsheet_lib::input::PointerEvent;
/// use relsheet_lib::model::{ColumnDescriptor, ColumnSchema, ColumnType, RowRecord, RowStore, TableData};
///
/// let table = TableData::new(
///     "people",
///     ColumnSchema::new(vec![ColumnDescriptor::new("name", "Name", ColumnType::Text)]),
///     RowStore::new(vec![RowRecord::new("1").set("name", "bar")]),
/// );
/// let mut sheet = Sheet::with_table(GridConfig::default(), table);
///
/// sheet.pointer(PointerEvent::Cell { cell: CellPos::new(0, 1), kind: ClickKind::Double });
/// let session = sheet.set_draft("baz").unwrap();
/// sheet.commit(session, CompletionTrigger::Enter).unwrap();
/// assert_eq!(sheet.table().rows().get(0).unwrap().value("name").to_text(), "baz");
/// ```
#[derive(Debug)]
pub struct Sheet {
    config: GridConfig,
    table: TableData,
    machine: FocusEditMachine,
    dispatcher: CellTypeDispatcher,
    navigator: KeyboardNavigator,
    processor: CommandProcessor,
    menu: Option<ContextMenu>,
    rename: RenameCoordinator,
    settings: ColumnSettings,
    loader: TableLoader,
}

impl Default for Sheet {
    fn default() -> Self {
        Self::new(GridConfig::default())
    }
}

impl Sheet {
    /// Creates a sheet with an empty table.
    pub fn new(config: GridConfig) -> Self {
        Self::with_table(config, TableData::default())
    }

    /// Creates a sheet on an existing table.
    pub fn with_table(config: GridConfig, table: TableData) -> Self {
        Self {
            dispatcher: CellTypeDispatcher::from_config(&config),
            processor: CommandProcessor::from_config(&config),
            config,
            table,
            machine: FocusEditMachine::new(),
            navigator: KeyboardNavigator::new(),
            menu: None,
            rename: RenameCoordinator::new(),
            settings: ColumnSettings::new(),
            loader: TableLoader::new(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn table(&self) -> &TableData {
        &self.table
    }

    pub fn state(&self) -> MachineState {
        self.machine.state()
    }

    pub fn machine(&self) -> &FocusEditMachine {
        &self.machine
    }

    pub fn dispatcher(&self) -> &CellTypeDispatcher {
        &self.dispatcher
    }

    pub fn menu(&self) -> Option<&ContextMenu> {
        self.menu.as_ref()
    }

    pub fn rename(&self) -> &RenameCoordinator {
        &self.rename
    }

    pub fn settings(&self) -> &ColumnSettings {
        &self.settings
    }

    pub fn is_loading(&self) -> bool {
        self.loader.is_loading()
    }

    /// Builds the view model for the current state.
    pub fn view(&self) -> GridView {
        GridView::build(&self.table, &self.machine, &self.dispatcher, &self.config)
    }

    // =========================================================================
    // Pointer and keyboard
    // =========================================================================

    /// Handles a pointer event from the rendering surface.
    pub fn pointer(&mut self, event: PointerEvent) -> MachineState {
        self.menu = None;
        match event {
            PointerEvent::Cell { cell, kind } => {
                self.machine.click_cell(cell, kind, &mut self.table, &self.dispatcher);
            }
            PointerEvent::Header { col } => {
                if !self.rename.is_open() {
                    self.machine.click_header(col, &mut self.table, &self.dispatcher);
                    self.follow_highlight();
                }
            }
            PointerEvent::HeaderDouble { col, anchor } => {
                if !self.rename.is_open() {
                    self.machine.click_header(col, &mut self.table, &self.dispatcher);
                    self.follow_highlight();
                    self.rename.open(col, anchor, &self.table);
                }
            }
        }
        self.machine.state()
    }

    /// Handles a key event from the global key channel.
    pub fn key(&mut self, event: KeyEvent) -> KeyOutcome {
        self.navigator.handle(
            event,
            self.rename.is_open(),
            &mut self.machine,
            &mut self.table,
            &self.dispatcher,
        )
    }

    /// Clears focus and discards any uncommitted edit.
    pub fn escape(&mut self) -> bool {
        self.machine.escape()
    }

    // =========================================================================
    // Editing
    // =========================================================================

    /// Starts editing the focused cell.
    pub fn begin_edit(&mut self) -> Option<SessionId> {
        self.machine.begin_edit(&mut self.table, &self.dispatcher)
    }

    /// Replaces the draft of the active edit session.
    pub fn set_draft(&mut self, draft: impl Into<Draft>) -> Option<SessionId> {
        self.machine.set_draft(draft.into())
    }

    /// Completes edit session `id`.
    pub fn commit(&mut self, id: SessionId, trigger: CompletionTrigger) -> Result<CommitOutcome, ValidationError> {
        self.machine.commit(id, trigger, &mut self.table, &self.dispatcher)
    }

    /// Completes whichever session is active.
    pub fn commit_active(&mut self, trigger: CompletionTrigger) -> Result<CommitOutcome, ValidationError> {
        self.machine.commit_active(trigger, &mut self.table, &self.dispatcher)
    }

    /// Discards edit session `id`, restoring the committed value.
    pub fn cancel_edit(&mut self, id: SessionId) -> bool {
        self.machine.cancel_edit(id)
    }

    // =========================================================================
    // Structural commands
    // =========================================================================

    /// Opens the context menu and returns the entries it offers.
    pub fn open_context_menu(&mut self, target: ContextMenuTarget) -> Vec<MenuAction> {
        let menu = ContextMenu::open(target, &self.table);
        let actions = menu.actions();
        self.menu = Some(menu);
        actions
    }

    pub fn close_context_menu(&mut self) -> bool {
        self.menu.take().is_some()
    }

    /// Runs a menu entry against the identities captured when the menu opened.
    pub fn menu_action(&mut self, action: MenuAction) -> CommandOutcome {
        let Some(menu) = self.menu.take() else {
            return CommandOutcome::NoOp;
        };
        match menu.resolve(action, &self.table) {
            Some(command) => self.execute(&command),
            None => {
                log::debug!("Menu target of {:?} no longer exists", action);
                CommandOutcome::NoOp
            }
        }
    }

    /// Executes a structural command, completing any open edit first.
    pub fn execute(&mut self, command: &ContextCommand) -> CommandOutcome {
        self.machine.force_complete(&mut self.table, &self.dispatcher);
        let outcome = self.processor.execute(command, &mut self.table);
        if let CommandOutcome::Rename(request) = &outcome {
            self.rename.open(request.col, Anchor::default(), &self.table);
        }
        self.after_change();
        outcome
    }

    // =========================================================================
    // Rename
    // =========================================================================

    /// Opens the rename popover for grid column `col`.
    pub fn rename_open(&mut self, col: usize, anchor: Anchor) -> bool {
        self.rename.open(col, anchor, &self.table)
    }

    pub fn rename_set_draft(&mut self, draft: impl Into<String>) -> bool {
        self.rename.set_draft(draft)
    }

    pub fn rename_commit(&mut self) -> RenameOutcome {
        let outcome = self.rename.commit(&mut self.table);
        self.after_change();
        outcome
    }

    pub fn rename_cancel(&mut self) -> bool {
        self.rename.cancel()
    }

    // =========================================================================
    // Settings panel
    // =========================================================================

    /// Opens the settings panel on the last focused column, or the fallback.
    pub fn settings_open(&mut self) {
        let column = self
            .machine
            .last_focused_column()
            .and_then(|key| self.table.columns().by_key(key));
        self.settings.open(column, &self.config.settings_fallback);
    }

    pub fn settings_update(&mut self, draft: SettingsDraft) -> bool {
        self.settings.update_draft(draft)
    }

    /// Applies the settings draft and closes the panel.
    pub fn settings_save(&mut self) -> SettingsOutcome {
        if !self.settings.is_open() {
            return SettingsOutcome::NotOpen;
        }
        self.machine.force_complete(&mut self.table, &self.dispatcher);
        let outcome = self.settings.save(&mut self.table);
        self.after_change();
        outcome
    }

    pub fn settings_cancel(&mut self) -> bool {
        self.settings.cancel()
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Starts a table request; any request still in flight becomes stale.
    pub fn begin_load(&mut self, name: impl Into<String>) -> FetchTicket {
        self.loader.begin(name)
    }

    /// Applies a fetch result if its ticket is still the latest.
    pub fn finish_load(&mut self, ticket: &FetchTicket, result: Result<TableFetch, SourceError>) -> LoadOutcome {
        let outcome = self.loader.finish(ticket, result, &mut self.table);
        if let LoadOutcome::Applied { .. } = outcome {
            if let Some(id) = self.machine.session().map(|s| s.id) {
                self.machine.cancel_edit(id);
            }
            self.menu = None;
            self.rename.cancel();
            self.after_change();
        }
        outcome
    }

    /// Fetches `name` from `source` and loads it.
    pub async fn load_table(&mut self, source: &dyn TableSource, name: &str) -> LoadOutcome {
        let ticket = self.begin_load(name);
        let result = source.fetch_table(name).await;
        self.finish_load(&ticket, result)
    }

    fn follow_highlight(&mut self) {
        if let MachineState::ColumnHighlighted { col } = self.machine.state() {
            if let Some(column) = self.table.column_at(col) {
                self.settings.follow(column, self.rename.is_open());
            }
        }
    }

    fn after_change(&mut self) {
        self.machine.reconcile(&self.table);
        self.settings.refresh(&self.table);
    }
}
