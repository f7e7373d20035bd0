//! Shared application state: the timer and the sinks it drives

use std::{
    fs::File,
    io::{Stdout, Write},
    sync::{Mutex, MutexGuard},
    time::Instant,
};
use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use super::{TimerEffect, TimerEvent, TimerState};
use crate::{
    error::AppError,
    output::{ConsoleRenderer, RunLog},
};

/// Everything that must change together when an event is applied
#[derive(Debug)]
struct Inner<L: Write, C: Write> {
    timer: TimerState,
    run_log: RunLog<L>,
    console: ConsoleRenderer<C>,
}

/// Single serialization point for the timer.
///
/// Transitions, their run log appends and console output, and render ticks
/// all happen under one lock, so a tick never sees a half-applied event and
/// log lines land in the order events were applied.
#[derive(Debug)]
pub struct AppState<L: Write = File, C: Write = Stdout> {
    inner: Mutex<Inner<L, C>>,
}

impl<L: Write, C: Write> AppState<L, C> {
    /// Create an idle timer writing to the given sinks
    pub fn new(run_log: RunLog<L>, console: ConsoleRenderer<C>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                timer: TimerState::new(),
                run_log,
                console,
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner<L, C>>, AppError> {
        self.inner.lock().map_err(|_| AppError::LockPoisoned)
    }

    /// Apply an event at the current instant
    pub fn handle(&self, event: TimerEvent) -> Result<Option<TimerEffect>, AppError> {
        self.handle_at(event, Instant::now(), Local::now())
    }

    /// Apply an event at `now`; `wall_clock` stamps a run-start header.
    ///
    /// Run log write failures are logged and otherwise ignored.
    pub fn handle_at(
        &self,
        event: TimerEvent,
        now: Instant,
        wall_clock: DateTime<Local>,
    ) -> Result<Option<TimerEffect>, AppError> {
        let mut guard = self.lock()?;
        let inner = &mut *guard;

        let effect = inner.timer.apply(event, now);
        debug!(?event, ?effect, phase = ?inner.timer.phase(), "Applied timer event");

        let write_result = match &effect {
            Some(TimerEffect::RunStarted) => {
                info!("Run started");
                inner.run_log.write_run_start(&wall_clock)
            }
            Some(TimerEffect::Paused { elapsed }) => inner.run_log.write_paused(*elapsed),
            Some(TimerEffect::Final { elapsed }) => {
                info!("Run finished after {:?}", elapsed);
                inner.run_log.write_final(*elapsed)
            }
            Some(TimerEffect::Split(split)) => {
                if let Err(e) = inner.console.render_split(split) {
                    debug!("Failed to render split: {}", e);
                }
                inner.run_log.write_split(split)
            }
            Some(TimerEffect::Resumed) | None => Ok(()),
        };

        if let Err(e) = write_result {
            warn!("Failed to append to run log: {}", e);
        }

        Ok(effect)
    }

    /// Redraw the live line at the current instant
    pub fn render_tick(&self) -> Result<(), AppError> {
        self.render_at(Instant::now())
    }

    /// Redraw the live line as of `now` without changing any state
    pub fn render_at(&self, now: Instant) -> Result<(), AppError> {
        let mut guard = self.lock()?;
        let inner = &mut *guard;

        let elapsed = inner.timer.current_elapsed(now);
        if let Err(e) = inner.console.render_elapsed(elapsed) {
            debug!("Failed to render elapsed time: {}", e);
        }
        Ok(())
    }

    /// Copy of the current timer state
    pub fn snapshot(&self) -> Result<TimerState, AppError> {
        Ok(self.lock()?.timer.clone())
    }

    /// Flush pending run log output
    pub fn flush(&self) -> Result<(), AppError> {
        self.lock()?.run_log.flush()?;
        Ok(())
    }

    /// Print the exit notice below the live line
    pub fn render_exit(&self) -> Result<(), AppError> {
        self.lock()?.console.render_exit()?;
        Ok(())
    }

    /// Tear down into the run log and console writers
    pub fn into_outputs(self) -> Result<(L, C), AppError> {
        let inner = self.inner.into_inner().map_err(|_| AppError::LockPoisoned)?;
        Ok((inner.run_log.into_inner(), inner.console.into_inner()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn memory_state() -> AppState<Vec<u8>, Vec<u8>> {
        AppState::new(RunLog::new(Vec::new()), ConsoleRenderer::new(Vec::new()))
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn resume_writes_nothing_to_run_log() {
        let state = memory_state();
        let t0 = Instant::now();
        let wall = Local::now();

        state.handle_at(TimerEvent::StartPause, t0, wall).unwrap();
        state.handle_at(TimerEvent::StartPause, t0 + ms(100), wall).unwrap();
        state.handle_at(TimerEvent::StartPause, t0 + ms(200), wall).unwrap();

        let (log, _) = state.into_outputs().unwrap();
        let log = String::from_utf8(log).unwrap();
        assert!(log.starts_with("\n\n[STARTTIME]:\t"));
        assert!(log.ends_with("\n[PAUSED]:\t00:00.100\n"));
        assert_eq!(log.matches('[').count(), 2);
    }

    #[test]
    fn render_does_not_change_state() {
        let state = memory_state();
        let t0 = Instant::now();
        state.handle_at(TimerEvent::StartPause, t0, Local::now()).unwrap();

        let before = state.snapshot().unwrap();
        state.render_at(t0 + ms(1_234)).unwrap();
        let after = state.snapshot().unwrap();

        assert_eq!(before.accumulated(), after.accumulated());
        assert_eq!(before.phase(), after.phase());

        let (_, console) = state.into_outputs().unwrap();
        assert_eq!(String::from_utf8(console).unwrap(), "\x1b[2K\r00:01.234");
    }

    #[test]
    fn split_is_rendered_and_logged() {
        let state = memory_state();
        let t0 = Instant::now();
        let wall = Local::now();
        state.handle_at(TimerEvent::StartPause, t0, wall).unwrap();
        state.handle_at(TimerEvent::Split, t0 + ms(2_000), wall).unwrap();

        let (log, console) = state.into_outputs().unwrap();
        assert!(String::from_utf8(log).unwrap().ends_with("[SPLIT1]:\t00:02.000\t00:02.000\n"));
        assert!(String::from_utf8(console).unwrap().contains("[SPLIT1]:\t00:02.000\t00:02.000\n"));
    }
}
