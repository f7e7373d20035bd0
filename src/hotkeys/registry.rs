//! Hotkey registration with guaranteed release

use std::fmt;

use tracing::{debug, info, warn};

use super::binding::{BindingError, HotkeyBinding};
use crate::state::TimerEvent;

/// The three timer controls that can be bound to a hotkey
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HotkeyAction {
    StartPause,
    Reset,
    Split,
}

impl HotkeyAction {
    pub const ALL: [HotkeyAction; 3] = [Self::StartPause, Self::Reset, Self::Split];

    pub fn name(&self) -> &'static str {
        match self {
            Self::StartPause => "start/pause",
            Self::Reset => "reset",
            Self::Split => "split",
        }
    }
}

impl fmt::Display for HotkeyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<HotkeyAction> for TimerEvent {
    fn from(action: HotkeyAction) -> Self {
        match action {
            HotkeyAction::StartPause => TimerEvent::StartPause,
            HotkeyAction::Reset => TimerEvent::Reset,
            HotkeyAction::Split => TimerEvent::Split,
        }
    }
}

/// Errors raised while resolving or registering hotkeys
#[derive(Debug, thiserror::Error)]
pub enum HotkeyError {
    #[error("invalid {action} hotkey: {source}")]
    InvalidBinding {
        action: HotkeyAction,
        #[source]
        source: BindingError,
    },

    #[error("{first} and {second} hotkeys are both bound to {binding}")]
    DuplicateBinding {
        first: HotkeyAction,
        second: HotkeyAction,
        binding: HotkeyBinding,
    },

    #[error("failed to initialise hotkey backend: {0}")]
    Backend(String),

    #[error("failed to register {action} hotkey {binding}: {reason}")]
    Register {
        action: HotkeyAction,
        binding: HotkeyBinding,
        reason: String,
    },

    #[error("failed to unregister hotkey {binding}: {reason}")]
    Unregister {
        binding: HotkeyBinding,
        reason: String,
    },
}

/// Resolved bindings for all three actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HotkeyBindings {
    pub start_pause: HotkeyBinding,
    pub reset: HotkeyBinding,
    pub split: HotkeyBinding,
}

impl HotkeyBindings {
    /// Resolve all three specifications; the first bad one is reported
    pub fn parse(start_pause: &str, reset: &str, split: &str) -> Result<Self, HotkeyError> {
        let resolve = |action: HotkeyAction, spec: &str| {
            HotkeyBinding::parse(spec).map_err(|source| HotkeyError::InvalidBinding { action, source })
        };

        let bindings = Self {
            start_pause: resolve(HotkeyAction::StartPause, start_pause)?,
            reset: resolve(HotkeyAction::Reset, reset)?,
            split: resolve(HotkeyAction::Split, split)?,
        };
        bindings.check_distinct()?;
        Ok(bindings)
    }

    pub fn get(&self, action: HotkeyAction) -> &HotkeyBinding {
        match action {
            HotkeyAction::StartPause => &self.start_pause,
            HotkeyAction::Reset => &self.reset,
            HotkeyAction::Split => &self.split,
        }
    }

    fn check_distinct(&self) -> Result<(), HotkeyError> {
        for (i, &first) in HotkeyAction::ALL.iter().enumerate() {
            for &second in &HotkeyAction::ALL[i + 1..] {
                if self.get(first) == self.get(second) {
                    return Err(HotkeyError::DuplicateBinding {
                        first,
                        second,
                        binding: *self.get(first),
                    });
                }
            }
        }
        Ok(())
    }
}

/// OS-level hotkey capability.
///
/// Implementations deliver a pressed event for each registered binding to
/// whatever sink they were constructed with.
pub trait HotkeyBackend {
    fn register(&mut self, binding: &HotkeyBinding, action: HotkeyAction) -> Result<(), HotkeyError>;

    fn unregister(&mut self, binding: &HotkeyBinding) -> Result<(), HotkeyError>;
}

/// Owns a backend and every binding registered through it.
///
/// Bindings are unregistered on [`release`](Self::release) and on drop, so a
/// failed startup or an early return never leaves a hotkey claimed.
pub struct HotkeyRegistry<B: HotkeyBackend> {
    backend: B,
    registered: Vec<(HotkeyAction, HotkeyBinding)>,
}

impl<B: HotkeyBackend> HotkeyRegistry<B> {
    /// Register start/pause, reset and split in that order.
    ///
    /// On the first failure everything registered so far is released before
    /// the error is returned.
    pub fn register_all(backend: B, bindings: &HotkeyBindings) -> Result<Self, HotkeyError> {
        let mut registry = Self {
            backend,
            registered: Vec::with_capacity(HotkeyAction::ALL.len()),
        };

        for action in HotkeyAction::ALL {
            let binding = *bindings.get(action);
            // registry drops on error, releasing earlier bindings
            registry.backend.register(&binding, action)?;
            info!(hotkey = %binding, "Registered {} hotkey", action);
            registry.registered.push((action, binding));
        }

        Ok(registry)
    }

    pub fn registered(&self) -> impl Iterator<Item = &(HotkeyAction, HotkeyBinding)> {
        self.registered.iter()
    }

    /// Unregister every binding, continuing past individual failures
    pub fn release(&mut self) {
        while let Some((action, binding)) = self.registered.pop() {
            match self.backend.unregister(&binding) {
                Ok(()) => debug!(hotkey = %binding, "Unregistered {} hotkey", action),
                Err(e) => warn!("{}", e),
            }
        }
    }
}

impl<B: HotkeyBackend> Drop for HotkeyRegistry<B> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_three_distinct_bindings() {
        let bindings = HotkeyBindings::parse("ctrl+s", "ctrl+r", "ctrl+x").unwrap();
        assert_eq!(bindings.get(HotkeyAction::Reset).to_string(), "Ctrl+R");
    }

    #[test]
    fn reports_which_action_is_invalid() {
        let err = HotkeyBindings::parse("ctrl+s", "ctrl+nope", "ctrl+x").unwrap_err();
        assert!(matches!(err, HotkeyError::InvalidBinding { action: HotkeyAction::Reset, .. }));
        assert_eq!(err.to_string(), "invalid reset hotkey: unrecognized token 'nope'");
    }

    #[test]
    fn rejects_same_chord_for_two_actions() {
        let err = HotkeyBindings::parse("ctrl+s", "ctrl+r", "CTRL+S").unwrap_err();
        assert!(matches!(
            err,
            HotkeyError::DuplicateBinding {
                first: HotkeyAction::StartPause,
                second: HotkeyAction::Split,
                ..
            }
        ));
    }

    #[test]
    fn actions_map_onto_timer_events() {
        assert_eq!(TimerEvent::from(HotkeyAction::StartPause), TimerEvent::StartPause);
        assert_eq!(TimerEvent::from(HotkeyAction::Reset), TimerEvent::Reset);
        assert_eq!(TimerEvent::from(HotkeyAction::Split), TimerEvent::Split);
    }
}
