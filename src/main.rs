//! Splitkey - A hotkey-driven split timer
//!
//! This is the main entry point for the splitkey application.

use std::sync::Arc;
use anyhow::Context;
use tokio::sync::{mpsc, watch};
use tracing::info;
use tracing_subscriber::EnvFilter;

use splitkey::{
    config::{self, Cli, FileConfig},
    error::AppError,
    hotkeys::{GlobalHotkeyBackend, HotkeyRegistry},
    output::{ConsoleRenderer, RunLog},
    state::AppState,
    tasks::{hotkey_listener_task, render_ticker_task},
    utils::{paths, ShutdownSignal},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Diagnostics go to stderr so they never share the live timer line
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("splitkey={}", cli.log_level())));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config_path()?;
    if cli.write_default_config {
        config::write_default_config(&config_path)?;
        println!("Wrote default config to {}", config_path.display());
        return Ok(());
    }

    info!("Starting splitkey v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: {}", config_path.display());

    // Everything that can fail is checked before any hotkey is claimed
    let file_config = FileConfig::from_file(&config_path)?;
    let bindings = file_config.bindings()?;
    let tick_interval = cli.tick_interval()?;
    let shutdown_signal =
        ShutdownSignal::install().context("failed to listen for shutdown signals")?;

    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let backend = GlobalHotkeyBackend::new(events_tx)?;

    let home = paths::home_dir();
    let output_path =
        config::resolve_output_path(cli.output.as_deref(), &file_config.outputpath, home.as_deref());
    let run_log = RunLog::open(&output_path).map_err(|source| AppError::OutputOpen {
        path: output_path.clone(),
        source,
    })?;

    let state = Arc::new(AppState::new(run_log, ConsoleRenderer::new(std::io::stdout())));

    let mut registry = HotkeyRegistry::register_all(backend, &bindings)?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let render_handle = tokio::spawn(render_ticker_task(
        Arc::clone(&state),
        tick_interval,
        shutdown_rx.clone(),
    ));
    let hotkey_handle = tokio::spawn(hotkey_listener_task(
        Arc::clone(&state),
        events_rx,
        shutdown_rx,
    ));

    info!(
        "Ready: {} start/pause, {} reset, {} split, logging to {}",
        bindings.start_pause,
        bindings.reset,
        bindings.split,
        output_path.display()
    );

    shutdown_signal.wait().await;
    info!("Shutdown signal received");

    // Stop the ticker, then the listener, then release the OS bindings
    let _ = shutdown_tx.send(true);
    if let Err(e) = render_handle.await {
        tracing::error!("Render ticker panicked: {}", e);
    }
    if let Err(e) = hotkey_handle.await {
        tracing::error!("Hotkey listener panicked: {}", e);
    }
    registry.release();

    state.flush().context("failed to flush run log")?;
    state.render_exit()?;

    info!("Shutdown complete");
    Ok(())
}
