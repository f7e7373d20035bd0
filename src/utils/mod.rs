//! Utility functions module
//!
//! This module contains utility functions used throughout the application.

pub mod format;
pub mod paths;
pub mod signals;

// Re-export main functions
pub use format::{format_duration, format_pair};
pub use signals::ShutdownSignal;
