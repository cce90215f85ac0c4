//! Data source error types

/// Errors that can occur while fetching a table from a data source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// No table with the given name exists.
    #[error("Table '{0}' not found")]
    NotFound(String),

    /// Reading the backing document failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing document is not valid JSON or has the wrong shape.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two rows of the same table share an identifier.
    #[error("Table '{table}' has duplicate row id '{id}'")]
    DuplicateRowId { table: String, id: String },

    /// Two columns of the same table share a key.
    #[error("Table '{table}' has duplicate column key '{key}'")]
    DuplicateColumnKey { table: String, key: String },

    /// A row has no usable identifier.
    #[error("Table '{table}' has a row without an id at position {position}")]
    MissingRowId { table: String, position: usize },
}
