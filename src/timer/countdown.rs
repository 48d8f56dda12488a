use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownState {
    NotStarted,
    Running,
    /// The timer ran down to zero
    Expired,
    /// The timer was reset before expiry
    Stopped,
}

/// Wall-clock countdown.
///
/// Remaining time is always derived from the start timestamp and the
/// current clock, never from an incremented counter, so a slow or uneven
/// tick cannot make it drift.
#[derive(Debug)]
pub struct Countdown {
    state: CountdownState,
    started_at: Option<Instant>,
    duration: Duration,
}

impl Countdown {
    pub fn new(duration: Duration) -> Self {
        Self {
            state: CountdownState::NotStarted,
            started_at: None,
            duration,
        }
    }

    pub fn from_minutes(minutes: f64) -> Self {
        Self::new(Duration::from_secs_f64(minutes.max(0.0) * 60.0))
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == CountdownState::Running
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Begin counting from now. Returns false (and changes nothing) if the
    /// countdown is already running; after expiry or a reset a new start
    /// re-arms it.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.started_at = Some(Instant::now());
        self.state = CountdownState::Running;
        true
    }

    /// Abandon the current run; the display goes back to the full duration.
    pub fn reset(&mut self) {
        self.started_at = None;
        self.state = CountdownState::Stopped;
    }

    /// Mark the countdown as having run down to zero.
    pub fn expire(&mut self) {
        self.state = CountdownState::Expired;
    }

    /// Time left. Full duration before a start or after a reset, zero once
    /// expired, lazily recomputed from the clock while running.
    pub fn remaining(&self) -> Duration {
        match (self.state, self.started_at) {
            (CountdownState::Running, Some(started)) => {
                self.duration.saturating_sub(started.elapsed())
            }
            (CountdownState::Expired, _) => Duration::ZERO,
            _ => self.duration,
        }
    }

    /// Remaining whole seconds, truncated: 119.5s left displays as 1:59.
    pub fn remaining_secs(&self) -> u64 {
        self.remaining().as_secs()
    }

    /// Change the configured duration by whole minutes, floored at zero.
    /// The start timestamp is untouched, so a mid-run change shifts the
    /// remaining time going forward.
    pub fn adjust_minutes(&mut self, delta: i64) {
        let seconds = self.duration.as_secs_f64() + (delta * 60) as f64;
        self.duration = Duration::from_secs_f64(seconds.max(0.0));
    }

    #[cfg(test)]
    pub(crate) fn backdate(&mut self, by: Duration) {
        if let Some(started) = self.started_at.as_mut() {
            *started -= by;
        }
    }
}
