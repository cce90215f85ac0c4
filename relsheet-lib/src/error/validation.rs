//! Validation error types

use crate::model::ColumnType;

/// A draft that failed type-specific normalization.
///
/// The edit session stays open when this is returned; nothing is committed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Invalid {column_type} value '{draft}': {reason}")]
pub struct ValidationError {
    /// The column type the draft was normalized against.
    pub column_type: ColumnType,
    /// The rejected draft, in text form.
    pub draft: String,
    /// Human-readable reason.
    pub reason: String,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(column_type: ColumnType, draft: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            column_type,
            draft: draft.into(),
            reason: reason.into(),
        }
    }
}
