//! System-wide hotkeys through the `global-hotkey` crate

use std::{
    collections::HashMap,
    str::FromStr,
    sync::{Arc, Mutex},
};

use global_hotkey::{
    hotkey::{Code, HotKey, Modifiers},
    GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState,
};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::{
    binding::HotkeyBinding,
    registry::{HotkeyAction, HotkeyBackend, HotkeyError},
};

type ActionMap = Arc<Mutex<HashMap<u32, HotkeyAction>>>;

/// Backend that claims bindings from the OS and forwards key presses
pub struct GlobalHotkeyBackend {
    manager: GlobalHotKeyManager,
    actions: ActionMap,
}

impl GlobalHotkeyBackend {
    /// Create the OS manager and route pressed events into `events`
    pub fn new(events: mpsc::UnboundedSender<HotkeyAction>) -> Result<Self, HotkeyError> {
        check_event_delivery()?;

        let manager =
            GlobalHotKeyManager::new().map_err(|e| HotkeyError::Backend(e.to_string()))?;
        let actions: ActionMap = Arc::default();

        let lookup = Arc::clone(&actions);
        GlobalHotKeyEvent::set_event_handler(Some(move |event: GlobalHotKeyEvent| {
            if event.state() != HotKeyState::Pressed {
                return;
            }
            let action = match lookup.lock() {
                Ok(actions) => actions.get(&event.id()).copied(),
                Err(_) => None,
            };
            match action {
                Some(action) => {
                    if events.send(action).is_err() {
                        debug!("Hotkey {} pressed after listener stopped", action);
                    }
                }
                None => debug!("Ignoring unknown hotkey id {}", event.id()),
            }
        }));

        Ok(Self { manager, actions })
    }

    fn to_hotkey(binding: &HotkeyBinding) -> Result<HotKey, String> {
        let code = Code::from_str(&binding.key.code_name())
            .map_err(|_| format!("key {} has no OS key code", binding.key))?;

        let m = &binding.modifiers;
        let mut modifiers = Modifiers::empty();
        if m.ctrl {
            modifiers |= Modifiers::CONTROL;
        }
        if m.shift {
            modifiers |= Modifiers::SHIFT;
        }
        if m.alt {
            modifiers |= Modifiers::ALT;
        }
        if m.super_key {
            modifiers |= Modifiers::SUPER;
        }

        Ok(HotKey::new(Some(modifiers), code))
    }
}

/// Fail unless pressed events can reach us without a platform event loop.
///
/// On X11 `global-hotkey` reads events on its own thread. Windows and macOS
/// only dispatch them to a thread running a message loop, which this process
/// does not run, so registering there would claim keys that never fire.
#[cfg(target_os = "linux")]
pub fn check_event_delivery() -> Result<(), HotkeyError> {
    Ok(())
}

#[cfg(not(target_os = "linux"))]
pub fn check_event_delivery() -> Result<(), HotkeyError> {
    Err(HotkeyError::Backend(format!(
        "global hotkeys need a platform event loop on {}, which splitkey does not run",
        std::env::consts::OS
    )))
}

impl HotkeyBackend for GlobalHotkeyBackend {
    fn register(&mut self, binding: &HotkeyBinding, action: HotkeyAction) -> Result<(), HotkeyError> {
        let register_err = |reason: String| HotkeyError::Register {
            action,
            binding: *binding,
            reason,
        };

        let hotkey = Self::to_hotkey(binding).map_err(register_err)?;
        self.manager
            .register(hotkey)
            .map_err(|e| register_err(e.to_string()))?;

        match self.actions.lock() {
            Ok(mut actions) => {
                actions.insert(hotkey.id(), action);
                Ok(())
            }
            Err(_) => {
                if let Err(e) = self.manager.unregister(hotkey) {
                    warn!("Failed to roll back {} hotkey: {}", action, e);
                }
                Err(register_err("hotkey action table is poisoned".to_string()))
            }
        }
    }

    fn unregister(&mut self, binding: &HotkeyBinding) -> Result<(), HotkeyError> {
        let unregister_err = |reason: String| HotkeyError::Unregister {
            binding: *binding,
            reason,
        };

        let hotkey = Self::to_hotkey(binding).map_err(unregister_err)?;
        if let Ok(mut actions) = self.actions.lock() {
            actions.remove(&hotkey.id());
        }
        self.manager
            .unregister(hotkey)
            .map_err(|e| unregister_err(e.to_string()))
    }
}

impl Drop for GlobalHotkeyBackend {
    fn drop(&mut self) {
        GlobalHotKeyEvent::set_event_handler(None::<fn(GlobalHotKeyEvent)>);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(target_os = "linux")]
    #[test]
    fn linux_delivers_events_without_a_loop() {
        assert!(check_event_delivery().is_ok());
    }

    #[cfg(not(target_os = "linux"))]
    #[test]
    fn other_platforms_refuse_before_registering() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let err = GlobalHotkeyBackend::new(tx).err().unwrap();
        assert!(matches!(err, HotkeyError::Backend(_)));
        assert!(err.to_string().contains(std::env::consts::OS));
    }
}
