use relsheet_lib::error::SourceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid {what}: {source}")]
    Json {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Logger setup failed: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error("Failed to load sheet '{name}': {error}")]
    Load { name: String, error: String },
}

impl CliError {
    pub fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        CliError::Io {
            path: path.display().to_string(),
            source,
        }
    }

    pub fn json(what: &'static str, source: serde_json::Error) -> Self {
        CliError::Json { what, source }
    }
}
