use std::fs::File;
use std::io::BufReader;

use anyhow::{Context, Result};
use rodio::{Decoder, OutputStream, Sink};

use crate::core::events::{AppEvent, BackendEvent, EventSender};
use crate::core::traits::{BackendState, MediaBackend};
use crate::library::Track;

/// Media backend on top of a rodio sink.
///
/// rodio decodes synchronously, so "loading" completes inside `load`; the
/// asynchronous shape of the interface is preserved by holding the loaded
/// notification until the next `poll`. End-of-track is detected in `poll`
/// as the sink draining while a track was live.
pub struct RodioBackend {
    sink: Sink,
    /// Loaded notification waiting for the next poll
    announce_loaded: bool,
    /// A track is appended and its stop has not been reported yet
    live: bool,
    playing: bool,
}

impl RodioBackend {
    pub fn new() -> Result<Self> {
        let (stream, stream_handle) = OutputStream::try_default()?;

        // This keeps the audio engine running globally for the life of the
        // program without binding it to this struct.
        // If we simply dropped it, sound would stop.
        std::mem::forget(stream);

        let sink = Sink::try_new(&stream_handle)?;

        Ok(Self {
            sink,
            announce_loaded: false,
            live: false,
            playing: false,
        })
    }
}

impl MediaBackend for RodioBackend {
    fn load(&mut self, track: &Track) -> Result<()> {
        self.sink.stop();
        self.live = false;
        self.playing = false;

        let file = File::open(track.path())
            .with_context(|| format!("failed to open {}", track.path().display()))?;
        let source = Decoder::new(BufReader::new(file))
            .with_context(|| format!("failed to decode {}", track.path().display()))?;

        // Hold the queued source until play(); the sequencer commands it
        // after the loaded notification round-trips.
        self.sink.pause();
        self.sink.append(source);
        self.announce_loaded = true;

        Ok(())
    }

    fn play(&mut self) {
        self.sink.play();
        self.playing = true;
    }

    fn stop(&mut self) {
        self.sink.stop();
        self.live = false;
        self.playing = false;
    }

    fn state(&self) -> BackendState {
        if self.sink.empty() {
            BackendState::Stopped
        } else if self.sink.is_paused() {
            BackendState::Paused
        } else {
            BackendState::Playing
        }
    }

    fn volume(&self) -> f32 {
        self.sink.volume()
    }

    fn set_volume(&mut self, level: f32) {
        self.sink.set_volume(level.clamp(0.0, 1.0));
    }

    fn poll(&mut self, events: &EventSender) {
        if self.announce_loaded {
            self.announce_loaded = false;
            self.live = true;
            let _ = events.send(AppEvent::Backend(BackendEvent::TrackLoaded));
        }

        // Drain edge: the queued track ran out on its own. Explicit stops
        // clear `live` first and are not re-reported here.
        if self.live && self.playing && self.sink.empty() {
            self.live = false;
            self.playing = false;
            let _ = events.send(AppEvent::Backend(BackendEvent::TrackStopped));
        }
    }
}

// To avoid leaks
impl Drop for RodioBackend {
    fn drop(&mut self) {
        self.sink.stop();
    }
}
