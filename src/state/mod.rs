//! State management module
//!
//! This module contains the timer state machine and the shared state that
//! serializes access to it.

pub mod app_state;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use timer_state::{Phase, SplitRecord, TimerEffect, TimerEvent, TimerState};
