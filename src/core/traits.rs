use crate::core::events::{EventSender, UiCommand};
use crate::library::Track;
use anyhow::Result;

/// Coarse backend state, as reported by the audio device layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendState {
    Stopped,
    Paused,
    Playing,
}

/// Abstraction for the external media backend.
///
/// `load` and `stop` complete asynchronously: the backend acknowledges them
/// by emitting `BackendEvent`s through `poll`, which the host loop calls
/// once per tick.
pub trait MediaBackend: Send {
    /// Begin loading a track (replaces whatever was queued)
    fn load(&mut self, track: &Track) -> Result<()>;

    /// Start playing the loaded track
    fn play(&mut self);

    /// Stop playback
    fn stop(&mut self);

    /// Current backend state
    fn state(&self) -> BackendState;

    /// Get volume (0.0 - 1.0)
    fn volume(&self) -> f32;

    /// Set volume (0.0 - 1.0)
    fn set_volume(&mut self, level: f32);

    /// Deliver any pending loaded/stopped notifications into the event
    /// channel. Must not block.
    fn poll(&mut self, events: &EventSender);
}

/// Abstraction for the countdown display shell.
pub trait CountdownDisplay: Send {
    /// Initialize the display (setup terminal, etc.)
    fn init(&mut self) -> Result<()>;

    /// Cleanup the display (restore terminal, etc.)
    fn cleanup(&mut self) -> Result<()>;

    /// Show a new remaining-time value, formatted as `M:SS`
    fn show_remaining(&mut self, formatted: &str) -> Result<()>;

    /// Poll for user input (non-blocking)
    /// Returns commands generated from user input
    fn poll_input(&mut self) -> Result<Vec<UiCommand>>;
}
