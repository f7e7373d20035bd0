//! Render ticker background task

use std::{io::Write, sync::Arc, time::Duration};
use tokio::{
    sync::watch,
    time::{interval, MissedTickBehavior},
};
use tracing::{error, info};

use crate::state::AppState;

/// Background task that redraws the live timer line every `period`
pub async fn render_ticker_task<L, C>(
    state: Arc<AppState<L, C>>,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) where
    L: Write + Send + 'static,
    C: Write + Send + 'static,
{
    info!("Starting render ticker ({:?} period)", period);

    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(e) = state.render_tick() {
                    error!("Failed to render timer: {}", e);
                    break;
                }
            }

            _ = shutdown.changed() => break,
        }
    }

    info!("Render ticker stopped");
}
