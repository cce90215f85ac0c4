//! Key and pointer events fed in by the host

use serde::Deserialize;
use serde::Serialize;

use crate::grid::CellPos;
use crate::grid::ClickKind;
use crate::grid::Direction;

/// Simplified key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

impl Key {
    /// The direction of an arrow key.
    pub fn direction(&self) -> Option<Direction> {
        match self {
            Key::Up => Some(Direction::Up),
            Key::Down => Some(Direction::Down),
            Key::Left => Some(Direction::Left),
            Key::Right => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Key modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Default::default()
        }
    }

    /// Ctrl or Alt is held; such combinations belong to the host.
    pub fn is_command(&self) -> bool {
        self.ctrl || self.alt
    }
}

/// Which surface holds input focus when a key arrives.
///
/// Grid navigation only runs while the grid itself owns input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputOwner {
    #[default]
    Grid,
    TextInput,
    ContentEditable,
    RenameDialog,
    OptionPopover,
}

impl InputOwner {
    /// Returns `true` if a nested surface has taken over the keyboard.
    pub fn is_nested(&self) -> bool {
        !matches!(self, InputOwner::Grid)
    }
}

/// A key press together with the surface that owned input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: Key,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub owner: InputOwner,
}

impl KeyEvent {
    /// A plain key press on the grid.
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
            owner: InputOwner::Grid,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_owner(mut self, owner: InputOwner) -> Self {
        self.owner = owner;
        self
    }
}

/// Where a popover should be placed, in host pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchor {
    pub x: i32,
    pub y: i32,
}

impl Anchor {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Pointer input from the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "pointer", rename_all = "snake_case")]
pub enum PointerEvent {
    /// Click on a body cell. Column 0 is the gutter.
    Cell {
        cell: CellPos,
        #[serde(default)]
        kind: ClickKind,
    },
    /// Single click on a column header.
    Header { col: usize },
    /// Double click on a column header, which opens the rename popover.
    HeaderDouble {
        col: usize,
        #[serde(default)]
        anchor: Anchor,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_event_defaults() {
        let event: KeyEvent = serde_json::from_str(r#"{"key": "down"}"#).unwrap();
        assert_eq!(event, KeyEvent::new(Key::Down));

        let event: KeyEvent =
            serde_json::from_str(r#"{"key": "enter", "owner": "text_input", "modifiers": {"ctrl": true}}"#).unwrap();
        assert!(event.owner.is_nested());
        assert!(event.modifiers.is_command());
    }

    #[test]
    fn test_pointer_event_json() {
        let event: PointerEvent =
            serde_json::from_str(r#"{"pointer": "cell", "cell": {"row": 1, "col": 2}, "kind": "double"}"#).unwrap();
        assert_eq!(
            event,
            PointerEvent::Cell {
                cell: CellPos::new(1, 2),
                kind: ClickKind::Double
            }
        );
    }
}
