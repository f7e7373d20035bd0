//! Splitkey - A hotkey-driven split timer
//!
//! This library provides the timer state machine, the hotkey plumbing that
//! feeds it, and the console and run log sinks it drives.

pub mod config;
pub mod error;
pub mod hotkeys;
pub mod output;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::{Cli, FileConfig};
pub use error::AppError;
pub use state::{AppState, TimerEvent, TimerState};
pub use utils::signals::ShutdownSignal;
