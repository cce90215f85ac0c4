//! Edit sessions

use serde::Deserialize;
use serde::Serialize;

use super::CellPos;
use crate::dispatch::Draft;
use crate::model::CellValue;
use crate::model::ColumnKey;
use crate::model::RowId;

/// Identifies one edit session.
///
/// Ids increase monotonically, so a completion trigger that names an earlier
/// session can be recognized and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub u64);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The single active inline edit.
///
/// The session pins the row id and column key it was opened on, so a commit
/// writes to the right record even if indices shift in between.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    pub id: SessionId,
    pub cell: CellPos,
    pub row_id: RowId,
    pub key: ColumnKey,
    /// Committed value when the session opened; restored on cancel.
    pub original: CellValue,
    pub draft: Draft,
}

/// What ended an edit session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionTrigger {
    /// The editor lost focus.
    Blur,
    /// Enter inside the editor.
    Enter,
    /// An explicit save, such as picking an option.
    Save,
    /// Another action needed the session closed.
    Forced,
}

/// Result of completing an edit session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitOutcome {
    /// The value was written.
    Saved,
    /// The value equals the committed one; nothing changed.
    Unchanged,
    /// The value equals the row's own id; the save was suppressed.
    IdentifierCollision,
    /// The session had already completed; the trigger was ignored.
    AlreadyCompleted,
}
