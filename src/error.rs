use thiserror::Error;

/// Reasons a flow graph is refused for saving.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphValidationError {
    #[error("The process has no start node")]
    MissingStart,

    #[error("The process has no end node")]
    MissingEnd,

    #[error("The process needs at least one step between start and end")]
    NoElements,

    #[error("The process must be connected: expected at least 2 connections, found {found}")]
    TooFewConnections { found: usize },
}

/// Errors surfaced by an editing session.
#[derive(Error, Debug, Clone)]
pub enum EditorError {
    #[error("Please provide a process name")]
    EmptyName,

    #[error("Invalid process: {0}")]
    InvalidGraph(#[from] GraphValidationError),

    #[error("Process '{0}' could not be found")]
    NotFound(String),

    #[error("Cannot save while {0}")]
    Busy(String),

    #[error("The editing session has already been closed")]
    Closed,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors raised by a process store.
#[derive(Error, Debug, Clone)]
pub enum StoreError {
    #[error("Process '{0}' not found in the store")]
    NotFound(String),

    #[error("Could not access '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Failed to (de)serialize processes: {0}")]
    Serialization(String),
}

/// Errors raised while loading a configuration file.
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(String),

    #[error("Failed to parse config: {0}")]
    Parse(String),
}
