use std::path::PathBuf;

/// Errors that can occur while exporting or importing a value table.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("value table was recorded for '{found}', expected '{expected}'")]
    GameMismatch { expected: String, found: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

/// A human selection that does not name one of the offered moves. Recoverable:
/// the session reports it and prompts again.
#[derive(Debug, thiserror::Error)]
pub enum MoveSelectionError {
    #[error("move {0} does not exist among the options listed")]
    OutOfRange(usize),

    #[error("'{0}' is not a move number")]
    NotANumber(String),
}
