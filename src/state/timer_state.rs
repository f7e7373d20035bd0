//! Timer state machine: elapsed accumulation, pause/resume and splits

use std::time::{Duration, Instant};

/// Input events the timer reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerEvent {
    /// Start a run, pause it, or resume it
    StartPause,
    /// End the current run
    Reset,
    /// Record a split at the current elapsed value
    Split,
}

/// Coarse timer phase derived from the run/running flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Paused,
    Running,
}

/// One recorded split
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitRecord {
    /// 1-based index within the current run
    pub index: u32,
    /// Elapsed run time when the split was taken
    pub elapsed: Duration,
    /// Time since the previous split (or since zero for the first one)
    pub delta: Duration,
}

/// Observable outcome of a transition, consumed by the output sinks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEffect {
    RunStarted,
    Resumed,
    Paused { elapsed: Duration },
    Final { elapsed: Duration },
    Split(SplitRecord),
}

/// Timer state for one run at a time
#[derive(Debug, Clone, Default)]
pub struct TimerState {
    /// Set from the first start of a run until reset
    run_active: bool,
    /// Instant of the most recent resume; `Some` exactly while running
    resumed_at: Option<Instant>,
    /// Sum of all completed running intervals in this run
    accumulated: Duration,
    /// Elapsed value of the latest split; `None` until one is recorded
    last_split: Option<Duration>,
    split_count: u32,
}

impl TimerState {
    /// Create an idle timer
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        match (self.is_run_active(), self.is_running()) {
            (_, true) => Phase::Running,
            (true, false) => Phase::Paused,
            (false, false) => Phase::Idle,
        }
    }

    pub fn is_running(&self) -> bool {
        self.resumed_at.is_some()
    }

    pub fn is_run_active(&self) -> bool {
        self.run_active
    }

    /// Time accumulated by completed running intervals
    pub fn accumulated(&self) -> Duration {
        self.accumulated
    }

    pub fn split_count(&self) -> u32 {
        self.split_count
    }

    pub fn last_split(&self) -> Option<Duration> {
        self.last_split
    }

    /// Elapsed run time as of `now`, frozen while not running
    pub fn current_elapsed(&self, now: Instant) -> Duration {
        match self.resumed_at {
            Some(resumed_at) => self.accumulated + now.saturating_duration_since(resumed_at),
            None => self.accumulated,
        }
    }

    /// Apply one event at `now` and return the effect it produced, if any
    pub fn apply(&mut self, event: TimerEvent, now: Instant) -> Option<TimerEffect> {
        match event {
            TimerEvent::StartPause => Some(self.toggle(now)),
            TimerEvent::Reset => self.reset(now),
            TimerEvent::Split => self.split(now),
        }
    }

    fn toggle(&mut self, now: Instant) -> TimerEffect {
        match self.resumed_at.take() {
            Some(resumed_at) => {
                self.accumulated += now.saturating_duration_since(resumed_at);
                TimerEffect::Paused {
                    elapsed: self.accumulated,
                }
            }
            None => {
                self.resumed_at = Some(now);
                if self.run_active {
                    TimerEffect::Resumed
                } else {
                    self.run_active = true;
                    TimerEffect::RunStarted
                }
            }
        }
    }

    fn reset(&mut self, now: Instant) -> Option<TimerEffect> {
        if !self.run_active {
            return None;
        }

        let elapsed = self.current_elapsed(now);
        *self = Self::new();
        Some(TimerEffect::Final { elapsed })
    }

    fn split(&mut self, now: Instant) -> Option<TimerEffect> {
        let candidate = self.current_elapsed(now);
        if self.last_split == Some(candidate) {
            return None;
        }

        let delta = candidate.saturating_sub(self.last_split.unwrap_or(Duration::ZERO));
        self.split_count += 1;
        self.last_split = Some(candidate);

        Some(TimerEffect::Split(SplitRecord {
            index: self.split_count,
            elapsed: candidate,
            delta,
        }))
    }
}
