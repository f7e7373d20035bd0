//! Crate-level error type

use std::path::PathBuf;

use crate::{config::ConfigError, hotkeys::HotkeyError};

/// Errors that stop the timer from starting or running
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Hotkey(#[from] HotkeyError),

    /// The run log could not be opened
    #[error("failed to open output file {path}: {source}")]
    OutputOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A thread panicked while holding the timer lock
    #[error("timer state lock poisoned")]
    LockPoisoned,
}
