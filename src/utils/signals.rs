//! Signal handling for graceful shutdown

use tracing::info;

/// Installed listener for shutdown signals (SIGTERM, SIGINT).
///
/// Installing is separate from waiting so a failure surfaces during startup.
pub struct ShutdownSignal {
    #[cfg(unix)]
    signals: signal_hook_tokio::Signals,
    #[cfg(windows)]
    ctrl_c: tokio::signal::windows::CtrlC,
}

impl ShutdownSignal {
    /// Register the signal handlers; must be called inside a tokio runtime
    #[cfg(unix)]
    pub fn install() -> std::io::Result<Self> {
        let signals = signal_hook_tokio::Signals::new([
            signal_hook::consts::SIGTERM,
            signal_hook::consts::SIGINT,
        ])?;
        Ok(Self { signals })
    }

    #[cfg(windows)]
    pub fn install() -> std::io::Result<Self> {
        Ok(Self {
            ctrl_c: tokio::signal::windows::ctrl_c()?,
        })
    }

    /// Wait for the first shutdown signal
    #[cfg(unix)]
    pub async fn wait(mut self) {
        use futures::stream::StreamExt;

        let handle = self.signals.handle();
        if let Some(signal) = self.signals.next().await {
            info!("Received signal: {}", signal);
        }
        handle.close();
    }

    #[cfg(windows)]
    pub async fn wait(mut self) {
        self.ctrl_c.recv().await;
        info!("Received Ctrl+C");
    }
}
