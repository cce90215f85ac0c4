//! Keyboard navigation

use serde::Serialize;

use super::Key;
use super::KeyEvent;
use crate::dispatch::CellTypeDispatcher;
use crate::grid::CellPos;
use crate::grid::FocusEditMachine;
use crate::grid::MachineState;
use crate::model::TableData;

/// Result of handling a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum KeyOutcome {
    /// The key changed grid state; the host must suppress its default action.
    Handled,
    /// The host should open the option popover of this cell's editor.
    ActivatePopover { cell: CellPos },
    /// The key is not for the grid.
    Ignored,
}

impl KeyOutcome {
    /// Returns `true` if the host must not run its default handling.
    pub fn prevent_default(&self) -> bool {
        !matches!(self, KeyOutcome::Ignored)
    }
}

/// Translates key events into focus/edit transitions.
///
/// Navigation is suppressed while a nested surface owns input or the rename
/// popover is open.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyboardNavigator;

impl KeyboardNavigator {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(
        &self,
        event: KeyEvent,
        rename_open: bool,
        machine: &mut FocusEditMachine,
        table: &mut TableData,
        dispatcher: &CellTypeDispatcher,
    ) -> KeyOutcome {
        if event.owner.is_nested() || rename_open {
            log::trace!("Key {:?} left to {:?}", event.key, event.owner);
            return KeyOutcome::Ignored;
        }
        if event.modifiers.is_command() {
            return KeyOutcome::Ignored;
        }

        if let Some(direction) = event.key.direction() {
            return match machine.state() {
                MachineState::CellFocused { .. } | MachineState::CellEditing { .. } => {
                    machine.move_focus(direction, table, dispatcher);
                    KeyOutcome::Handled
                }
                _ => KeyOutcome::Ignored,
            };
        }

        match event.key {
            Key::Enter => match machine.state() {
                MachineState::CellEditing { cell }
                    if dispatcher.behavior(table.column_at(cell.col)).has_popover() =>
                {
                    KeyOutcome::ActivatePopover { cell }
                }
                MachineState::CellFocused { cell } | MachineState::CellEditing { cell } => {
                    machine.begin_edit_at(cell, table, dispatcher);
                    KeyOutcome::Handled
                }
                _ => KeyOutcome::Ignored,
            },
            Key::Escape => {
                if machine.escape() {
                    KeyOutcome::Handled
                } else {
                    KeyOutcome::Ignored
                }
            }
            _ => KeyOutcome::Ignored,
        }
    }
}
