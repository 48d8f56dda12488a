//! Scripted collaborators for unit tests.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Result, anyhow};

use crate::core::events::{EventSender, UiCommand};
use crate::core::traits::{BackendState, CountdownDisplay, MediaBackend};
use crate::library::Track;

#[derive(Debug)]
struct MockInner {
    state: BackendState,
    volume: f32,
    loads: Vec<PathBuf>,
    play_calls: usize,
    stop_calls: usize,
    volume_history: Vec<f32>,
    fail_next_load: bool,
}

/// A scripted media backend. Clones share state, so a test can keep a
/// handle while the engine owns the boxed trait object.
#[derive(Debug, Clone)]
pub struct MockBackend {
    inner: Arc<Mutex<MockInner>>,
}

impl MockBackend {
    /// Backend that was started before: stopped, but at nominal volume.
    pub fn new() -> Self {
        Self::with_volume(1.0)
    }

    /// Backend that has never played anything: stopped and silent. This is
    /// the state that makes the volume controller defer a set.
    pub fn stopped_silent() -> Self {
        Self::with_volume(0.0)
    }

    fn with_volume(volume: f32) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockInner {
                state: BackendState::Stopped,
                volume,
                loads: Vec::new(),
                play_calls: 0,
                stop_calls: 0,
                volume_history: Vec::new(),
                fail_next_load: false,
            })),
        }
    }

    pub fn fail_next_load(&self) {
        self.inner.lock().unwrap().fail_next_load = true;
    }

    pub fn loads(&self) -> Vec<PathBuf> {
        self.inner.lock().unwrap().loads.clone()
    }

    pub fn last_load(&self) -> Option<PathBuf> {
        self.inner.lock().unwrap().loads.last().cloned()
    }

    pub fn play_calls(&self) -> usize {
        self.inner.lock().unwrap().play_calls
    }

    pub fn stop_calls(&self) -> usize {
        self.inner.lock().unwrap().stop_calls
    }

    pub fn volume_history(&self) -> Vec<f32> {
        self.inner.lock().unwrap().volume_history.clone()
    }
}

impl MediaBackend for MockBackend {
    fn load(&mut self, track: &Track) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_next_load {
            inner.fail_next_load = false;
            return Err(anyhow!("scripted load failure"));
        }
        inner.loads.push(track.path().to_path_buf());
        Ok(())
    }

    fn play(&mut self) {
        let mut inner = self.inner.lock().unwrap();
        inner.play_calls += 1;
        inner.state = BackendState::Playing;
    }

    fn stop(&mut self) {
        let mut inner = self.inner.lock().unwrap();
        inner.stop_calls += 1;
        inner.state = BackendState::Stopped;
    }

    fn state(&self) -> BackendState {
        self.inner.lock().unwrap().state
    }

    fn volume(&self) -> f32 {
        self.inner.lock().unwrap().volume
    }

    fn set_volume(&mut self, level: f32) {
        let mut inner = self.inner.lock().unwrap();
        inner.volume = level;
        inner.volume_history.push(level);
    }

    fn poll(&mut self, _events: &EventSender) {}
}

/// A display that records what it was told to show and reports no input.
#[derive(Debug, Clone)]
pub struct NullDisplay {
    shown: Arc<Mutex<Vec<String>>>,
}

impl NullDisplay {
    pub fn new() -> Self {
        Self {
            shown: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn shown(&self) -> Vec<String> {
        self.shown.lock().unwrap().clone()
    }
}

impl CountdownDisplay for NullDisplay {
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        Ok(())
    }

    fn show_remaining(&mut self, formatted: &str) -> Result<()> {
        self.shown.lock().unwrap().push(formatted.to_string());
        Ok(())
    }

    fn poll_input(&mut self) -> Result<Vec<UiCommand>> {
        Ok(Vec::new())
    }
}
