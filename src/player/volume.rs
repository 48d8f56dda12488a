use crate::core::traits::{BackendState, MediaBackend};
use crate::utils::{level_to_volume_percent, volume_percent_to_level};

/// Step used by `volume_up` / `volume_down`, in percent.
pub const VOLUME_STEP: u8 = 5;

/// A backend volume at or below this counts as "never started": a set
/// while stopped and silent would be discarded by the device layer, so it
/// is deferred instead.
const SILENT_EPSILON: f32 = 1e-3;

/// Maintains the desired volume level.
///
/// While the backend is stopped with zero volume (playback has never truly
/// begun), a requested level is held as a pending value and applied exactly
/// once when the next track finishes loading. Once playback is live, sets
/// go straight through.
#[derive(Debug, Default)]
pub struct VolumeControl {
    pending: Option<u8>,
}

impl VolumeControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a volume in percent. Deferred if the backend cannot take it
    /// yet, applied immediately otherwise. Input above 100 is clamped.
    pub fn set_percent(&mut self, backend: &mut dyn MediaBackend, percent: u8) {
        let percent = percent.min(100);
        if backend.state() == BackendState::Stopped && backend.volume() <= SILENT_EPSILON {
            self.pending = Some(percent);
        } else {
            // A direct set supersedes any level still deferred.
            self.pending = None;
            backend.set_volume(volume_percent_to_level(percent));
        }
    }

    pub fn volume_up(&mut self, backend: &mut dyn MediaBackend) {
        self.adjust(backend, VOLUME_STEP as i16);
    }

    pub fn volume_down(&mut self, backend: &mut dyn MediaBackend) {
        self.adjust(backend, -(VOLUME_STEP as i16));
    }

    fn adjust(&mut self, backend: &mut dyn MediaBackend, delta: i16) {
        // A pending request is the user's latest word; adjust relative to
        // it rather than the backend's (stale) level.
        let base = self
            .pending
            .unwrap_or_else(|| level_to_volume_percent(backend.volume()));
        let target = (base as i16 + delta).clamp(0, 100) as u8;
        self.set_percent(backend, target);
    }

    /// Apply a pending level, if any. Called on the track-loaded
    /// notification; the pending value is cleared afterwards.
    pub fn apply_pending(&mut self, backend: &mut dyn MediaBackend) {
        if let Some(percent) = self.pending.take() {
            backend.set_volume(volume_percent_to_level(percent));
        }
    }

    pub fn pending(&self) -> Option<u8> {
        self.pending
    }
}
