//! Hotkey resolution and registration
//!
//! Bindings are parsed from their textual form, then claimed from the OS
//! through a [`HotkeyBackend`]. Pressed events arrive as [`HotkeyAction`]s on
//! an mpsc channel that the hotkey listener task drains.

pub mod binding;
pub mod global;
pub mod registry;

// Re-export main types
pub use binding::{BindingError, HotkeyBinding, KeyCode, ModifierSet};
pub use global::GlobalHotkeyBackend;
pub use registry::{HotkeyAction, HotkeyBackend, HotkeyBindings, HotkeyError, HotkeyRegistry};
