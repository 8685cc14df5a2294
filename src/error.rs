use std::path::PathBuf;

use crate::game::{Symbol, COLS};

/// A raw column choice that could not be turned into a column index.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColumnParseError {
    #[error("please enter a column number")]
    Empty,

    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("column {0} is out of range (choose 0-{max})", max = COLS - 1)]
    OutOfRange(i64),
}

/// Errors raised while assembling a game session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("both players use symbol {0}")]
    DuplicateSymbol(Symbol),
}

/// Errors that end a running game or session.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("input closed before the game finished")]
    InputClosed,

    #[error("no open column left to play")]
    NoLegalMove,

    #[error("invalid session setup: {0}")]
    Setup(#[from] SetupError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
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
