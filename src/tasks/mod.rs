//! Background tasks module
//!
//! This module contains the two workers that feed the timer: the render
//! ticker and the hotkey listener.

pub mod hotkey_listener;
pub mod render_ticker;

// Re-export main functions
pub use hotkey_listener::hotkey_listener_task;
pub use render_ticker::render_ticker_task;
