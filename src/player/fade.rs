use std::time::{Duration, Instant};

use crate::core::traits::MediaBackend;

/// Ramp resolution: 200 steps per second of fade, i.e. one step every 5 ms.
pub const STEPS_PER_SECOND: u32 = 200;

const STEP_MILLIS: u128 = 1_000 / STEPS_PER_SECOND as u128;

/// The linear fade curve as a value: a start level and a fixed number of
/// discrete steps. Level at step `n` is `v0 - (v0 / total) * n`.
#[derive(Debug, Clone, Copy)]
pub struct FadeRamp {
    start_level: f32,
    total_steps: u32,
}

impl FadeRamp {
    pub fn new(start_level: f32, duration: Duration) -> Self {
        // Zero or sub-step durations produce an empty ramp; the driver
        // then stops immediately without ever dividing by the step count.
        let total_steps = (duration.as_secs_f32() * STEPS_PER_SECOND as f32) as u32;
        Self {
            start_level,
            total_steps,
        }
    }

    pub fn total_steps(&self) -> u32 {
        self.total_steps
    }

    /// Level at a step in `[0, total_steps)`.
    pub fn level_at(&self, step: u32) -> f32 {
        let decrement = self.start_level / self.total_steps as f32;
        (self.start_level - decrement * step as f32).max(0.0)
    }

    /// Successive ramp levels, first to last.
    pub fn levels(&self) -> impl Iterator<Item = f32> + '_ {
        (0..self.total_steps).map(|step| self.level_at(step))
    }
}

/// An in-progress fade-out.
///
/// Driven by the host loop: each `tick` maps elapsed wall time to a ramp
/// step and sets the backend volume, so no call ever sleeps. When the ramp
/// is exhausted the backend is stopped and the pre-fade volume restored,
/// leaving the next start at nominal level rather than silence.
#[derive(Debug)]
pub struct FadeOut {
    ramp: FadeRamp,
    restore_level: f32,
    started: Instant,
}

impl FadeOut {
    /// Capture the current volume and begin the ramp. The caller must have
    /// suppressed auto-advance first, or the stop at the end of the ramp
    /// would queue another track.
    pub fn begin(backend: &dyn MediaBackend, duration: Duration) -> Self {
        let level = backend.volume();
        Self {
            ramp: FadeRamp::new(level, duration),
            restore_level: level,
            started: Instant::now(),
        }
    }

    /// Advance the fade. Returns true once the fade has completed: the
    /// backend is stopped and its volume is back at the pre-fade level.
    pub fn tick(&mut self, backend: &mut dyn MediaBackend) -> bool {
        let step = (self.started.elapsed().as_millis() / STEP_MILLIS) as u32;
        if step >= self.ramp.total_steps() {
            backend.stop();
            backend.set_volume(self.restore_level);
            true
        } else {
            backend.set_volume(self.ramp.level_at(step));
            false
        }
    }

    /// Abandon the ramp, restoring the pre-fade volume. The backend keeps
    /// playing; used when a new session starts before the fade finished.
    pub fn cancel(self, backend: &mut dyn MediaBackend) {
        backend.set_volume(self.restore_level);
    }

    #[cfg(test)]
    pub(crate) fn backdate(&mut self, by: Duration) {
        self.started -= by;
    }
}
