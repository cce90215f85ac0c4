//! Focus positions and states

use serde::Deserialize;
use serde::Serialize;

/// Address of a cell in grid coordinates.
///
/// Column 0 is the row-number gutter; data columns start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}

impl CellPos {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Moves one step in `direction`, clamped to `rows` x `cols`.
    pub fn step(self, direction: Direction, rows: usize, cols: usize) -> Self {
        let max_row = rows.saturating_sub(1);
        let max_col = cols.saturating_sub(1);
        let (row, col) = match direction {
            Direction::Up => (self.row.saturating_sub(1), self.col),
            Direction::Down => (self.row.saturating_add(1), self.col),
            Direction::Left => (self.row, self.col.saturating_sub(1)),
            Direction::Right => (self.row, self.col.saturating_add(1)),
        };
        Self {
            row: row.min(max_row),
            col: col.min(max_col),
        }
    }
}

impl std::fmt::Display for CellPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Arrow key direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Single or double click.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickKind {
    #[default]
    Single,
    Double,
}

/// What keyboard input currently acts on.
///
/// Exactly one of these is active at a time, which makes row focus and
/// column highlight mutually exclusive by construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    None,
    Row(usize),
    Cell(CellPos),
    Column(usize),
}

/// Externally visible state of the focus/edit machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum MachineState {
    Idle,
    CellFocused { cell: CellPos },
    CellEditing { cell: CellPos },
    RowFocused { row: usize },
    ColumnHighlighted { col: usize },
}

impl MachineState {
    pub fn is_idle(&self) -> bool {
        matches!(self, MachineState::Idle)
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, MachineState::CellEditing { .. })
    }

    /// The focused or edited cell, if any.
    pub fn cell(&self) -> Option<CellPos> {
        match self {
            MachineState::CellFocused { cell } | MachineState::CellEditing { cell } => Some(*cell),
            _ => None,
        }
    }
}

impl std::fmt::Display for MachineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MachineState::Idle => write!(f, "idle"),
            MachineState::CellFocused { cell } => write!(f, "cell focused {}", cell),
            MachineState::CellEditing { cell } => write!(f, "cell editing {}", cell),
            MachineState::RowFocused { row } => write!(f, "row focused {}", row),
            MachineState::ColumnHighlighted { col } => write!(f, "column highlighted {}", col),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_clamps_at_edges() {
        let origin = CellPos::new(0, 0);
        assert_eq!(origin.step(Direction::Up, 3, 4), origin);
        assert_eq!(origin.step(Direction::Left, 3, 4), origin);

        let corner = CellPos::new(2, 3);
        assert_eq!(corner.step(Direction::Down, 3, 4), corner);
        assert_eq!(corner.step(Direction::Right, 3, 4), corner);
        assert_eq!(corner.step(Direction::Up, 3, 4), CellPos::new(1, 3));
    }

    #[test]
    fn test_step_clamps_stale_position() {
        assert_eq!(CellPos::new(9, 9).step(Direction::Left, 2, 2), CellPos::new(1, 1));
    }
}
