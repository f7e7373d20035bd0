//! Hotkey listener background task

use std::{io::Write, sync::Arc};
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info};

use crate::{hotkeys::HotkeyAction, state::AppState};

/// Background task that applies hotkey presses to the timer in arrival order
pub async fn hotkey_listener_task<L, C>(
    state: Arc<AppState<L, C>>,
    mut events: mpsc::UnboundedReceiver<HotkeyAction>,
    mut shutdown: watch::Receiver<bool>,
) where
    L: Write + Send + 'static,
    C: Write + Send + 'static,
{
    info!("Starting hotkey listener");

    loop {
        tokio::select! {
            // shutdown wins over queued presses
            biased;

            _ = shutdown.changed() => break,

            action = events.recv() => {
                let Some(action) = action else {
                    debug!("Hotkey channel closed");
                    break;
                };

                debug!("Hotkey pressed: {}", action);
                if let Err(e) = state.handle(action.into()) {
                    error!("Failed to apply {} hotkey: {}", action, e);
                    break;
                }
            }
        }
    }

    info!("Hotkey listener stopped");
}
