use log::debug;

use crate::core::error::PlayerError;
use crate::core::traits::MediaBackend;
use crate::library::Playlist;
use crate::player::volume::VolumeControl;

/// Where the playback session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// No session yet
    Idle,
    /// A load was requested; waiting for the loaded notification
    Loading,
    /// The backend is playing the current track
    Playing,
    /// A fade-out is ramping the volume down
    FadingOut,
    /// The session ended; a new `start_play` begins the next one
    Stopped,
}

/// Advances through the playlist and reacts to backend notifications.
///
/// Auto-advance is driven entirely by stopped notifications: while
/// `should_play` holds, a stopped track means "load the next one", which is
/// what makes the playlist circular. Stopping or fading clears
/// `should_play` before the backend is told to stop, so the notification
/// the stop provokes cannot queue another track.
#[derive(Debug)]
pub struct Sequencer {
    playlist: Playlist,
    state: PlaybackState,
    should_play: bool,
}

impl Sequencer {
    pub fn new(playlist: Playlist) -> Self {
        Self {
            playlist,
            state: PlaybackState::Idle,
            should_play: false,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    /// Load the track at the cursor and begin a session. On an empty
    /// playlist nothing is mutated. A backend load failure leaves the
    /// session stopped.
    pub fn start_play(&mut self, backend: &mut dyn MediaBackend) -> Result<(), PlayerError> {
        let track = self.playlist.next_track()?;
        self.should_play = true;
        self.state = PlaybackState::Loading;
        if let Err(e) = backend.load(&track) {
            self.should_play = false;
            self.state = PlaybackState::Stopped;
            return Err(PlayerError::Backend(e));
        }
        Ok(())
    }

    /// Backend finished loading a track. Applies any deferred volume, then
    /// starts playback. Ignored outside `Loading`; in particular a track
    /// that finishes loading mid-fade must not start playing.
    pub fn on_track_loaded(&mut self, volume: &mut VolumeControl, backend: &mut dyn MediaBackend) {
        if self.state != PlaybackState::Loading {
            return;
        }
        volume.apply_pending(backend);
        backend.play();
        self.state = PlaybackState::Playing;
    }

    /// Backend reported the current track stopped. While playback is still
    /// intended, that means end-of-track: load the next one. Any failure
    /// here is best-effort; playback is simply left stopped.
    pub fn on_track_stopped(&mut self, backend: &mut dyn MediaBackend) {
        match self.state {
            PlaybackState::Idle => {}
            // The fade driver owns the transition out of FadingOut.
            PlaybackState::FadingOut => {}
            _ if self.should_play => match self.advance(backend) {
                Ok(()) => self.state = PlaybackState::Loading,
                Err(e) => {
                    debug!("auto-advance failed, leaving playback stopped: {e}");
                    self.should_play = false;
                    self.state = PlaybackState::Stopped;
                }
            },
            _ => self.state = PlaybackState::Stopped,
        }
    }

    fn advance(&mut self, backend: &mut dyn MediaBackend) -> Result<(), PlayerError> {
        let track = self.playlist.next_track()?;
        backend.load(&track)?;
        Ok(())
    }

    /// Explicit stop: suppress auto-advance first, then halt the backend.
    pub fn stop_play(&mut self, backend: &mut dyn MediaBackend) {
        self.should_play = false;
        backend.stop();
        self.state = PlaybackState::Stopped;
    }

    /// Enter the fading state, suppressing auto-advance. Returns false if
    /// nothing is playing or loading; the caller then skips the ramp.
    pub fn begin_fade(&mut self) -> bool {
        match self.state {
            PlaybackState::Playing | PlaybackState::Loading => {
                self.should_play = false;
                self.state = PlaybackState::FadingOut;
                true
            }
            _ => false,
        }
    }

    /// The fade driver finished stopping the backend.
    pub fn on_fade_finished(&mut self) {
        if self.state == PlaybackState::FadingOut {
            self.state = PlaybackState::Stopped;
        }
    }

    pub fn set_position(&mut self, index: usize) {
        self.playlist.set_position(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::MockBackend;
    use std::path::{Path, PathBuf};

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn sequencer_of(names: &[&str]) -> Sequencer {
        let mut playlist = Playlist::new();
        for name in names {
            playlist.add_from_file(Path::new(name)).unwrap();
        }
        Sequencer::new(playlist)
    }

    // ── start_play ────────────────────────────────────────────────────────────

    #[test]
    fn start_play_on_empty_playlist_fails_without_mutating_anything() {
        let backend = MockBackend::new();
        let mut sequencer = Sequencer::new(Playlist::new());

        let err = sequencer.start_play(&mut backend.clone()).unwrap_err();

        assert!(matches!(err, PlayerError::EmptyPlaylist));
        assert_eq!(sequencer.state(), PlaybackState::Idle);
        assert_eq!(sequencer.playlist().position(), 0);
        assert!(backend.loads().is_empty());
    }

    #[test]
    fn start_play_loads_cursor_track_and_enters_loading() {
        let backend = MockBackend::new();
        let mut sequencer = sequencer_of(&["a.mp3", "b.flac"]);

        sequencer.start_play(&mut backend.clone()).unwrap();

        assert_eq!(sequencer.state(), PlaybackState::Loading);
        assert_eq!(backend.loads(), vec![PathBuf::from("a.mp3")]);
        // Play waits for the loaded notification.
        assert_eq!(backend.play_calls(), 0);
    }

    #[test]
    fn start_play_load_failure_leaves_session_stopped() {
        let backend = MockBackend::new();
        backend.fail_next_load();
        let mut sequencer = sequencer_of(&["a.mp3"]);

        let err = sequencer.start_play(&mut backend.clone()).unwrap_err();

        assert!(matches!(err, PlayerError::Backend(_)));
        assert_eq!(sequencer.state(), PlaybackState::Stopped);
    }

    // ── Notifications ─────────────────────────────────────────────────────────

    #[test]
    fn loaded_notification_starts_playback() {
        let backend = MockBackend::new();
        let mut volume = VolumeControl::new();
        let mut sequencer = sequencer_of(&["a.mp3"]);
        sequencer.start_play(&mut backend.clone()).unwrap();

        sequencer.on_track_loaded(&mut volume, &mut backend.clone());

        assert_eq!(sequencer.state(), PlaybackState::Playing);
        assert_eq!(backend.play_calls(), 1);
    }

    #[test]
    fn loaded_notification_applies_pending_volume_before_playing() {
        let backend = MockBackend::stopped_silent();
        let mut volume = VolumeControl::new();
        volume.set_percent(&mut backend.clone(), 30);
        assert_eq!(volume.pending(), Some(30));

        let mut sequencer = sequencer_of(&["a.mp3"]);
        sequencer.start_play(&mut backend.clone()).unwrap();
        sequencer.on_track_loaded(&mut volume, &mut backend.clone());

        assert_eq!(volume.pending(), None);
        assert_eq!(backend.volume_history(), vec![0.3]);
        assert_eq!(backend.play_calls(), 1);
    }

    #[test]
    fn stopped_notification_auto_advances_circularly() {
        let backend = MockBackend::new();
        let mut volume = VolumeControl::new();
        let mut sequencer = sequencer_of(&["a.mp3", "b.flac"]);

        sequencer.start_play(&mut backend.clone()).unwrap();
        sequencer.on_track_loaded(&mut volume, &mut backend.clone());
        assert_eq!(backend.last_load(), Some(PathBuf::from("a.mp3")));

        // Natural end of track: advance to b, then wrap back to a.
        sequencer.on_track_stopped(&mut backend.clone());
        assert_eq!(sequencer.state(), PlaybackState::Loading);
        assert_eq!(backend.last_load(), Some(PathBuf::from("b.flac")));

        sequencer.on_track_loaded(&mut volume, &mut backend.clone());
        sequencer.on_track_stopped(&mut backend.clone());
        assert_eq!(backend.last_load(), Some(PathBuf::from("a.mp3")));
        assert_eq!(backend.loads().len(), 3);
    }

    #[test]
    fn explicit_stop_suppresses_auto_advance() {
        let backend = MockBackend::new();
        let mut volume = VolumeControl::new();
        let mut sequencer = sequencer_of(&["a.mp3", "b.flac"]);
        sequencer.start_play(&mut backend.clone()).unwrap();
        sequencer.on_track_loaded(&mut volume, &mut backend.clone());

        sequencer.stop_play(&mut backend.clone());
        assert_eq!(backend.stop_calls(), 1);

        // The stop the backend acknowledges must not load another track.
        sequencer.on_track_stopped(&mut backend.clone());
        assert_eq!(sequencer.state(), PlaybackState::Stopped);
        assert_eq!(backend.loads().len(), 1);
    }

    #[test]
    fn failed_auto_advance_is_swallowed_and_leaves_playback_stopped() {
        let backend = MockBackend::new();
        let mut volume = VolumeControl::new();
        let mut sequencer = sequencer_of(&["a.mp3", "b.flac"]);
        sequencer.start_play(&mut backend.clone()).unwrap();
        sequencer.on_track_loaded(&mut volume, &mut backend.clone());

        backend.fail_next_load();
        sequencer.on_track_stopped(&mut backend.clone());

        assert_eq!(sequencer.state(), PlaybackState::Stopped);

        // A later stray notification stays ignored.
        sequencer.on_track_stopped(&mut backend.clone());
        assert_eq!(backend.loads().len(), 1);
    }

    #[test]
    fn stopped_notification_in_idle_is_ignored() {
        let backend = MockBackend::new();
        let mut sequencer = sequencer_of(&["a.mp3"]);

        sequencer.on_track_stopped(&mut backend.clone());

        assert_eq!(sequencer.state(), PlaybackState::Idle);
        assert!(backend.loads().is_empty());
    }

    // ── Fade coordination ─────────────────────────────────────────────────────

    #[test]
    fn begin_fade_only_from_playing_or_loading() {
        let backend = MockBackend::new();
        let mut volume = VolumeControl::new();
        let mut sequencer = sequencer_of(&["a.mp3"]);
        assert!(!sequencer.begin_fade()); // Idle

        sequencer.start_play(&mut backend.clone()).unwrap();
        assert!(sequencer.begin_fade()); // Loading
        sequencer.on_fade_finished();
        assert!(!sequencer.begin_fade()); // Stopped

        sequencer.start_play(&mut backend.clone()).unwrap();
        sequencer.on_track_loaded(&mut volume, &mut backend.clone());
        assert!(sequencer.begin_fade()); // Playing
        assert_eq!(sequencer.state(), PlaybackState::FadingOut);
    }

    #[test]
    fn track_loaded_mid_fade_does_not_start_playing() {
        let backend = MockBackend::new();
        let mut volume = VolumeControl::new();
        let mut sequencer = sequencer_of(&["a.mp3"]);
        sequencer.start_play(&mut backend.clone()).unwrap();
        assert!(sequencer.begin_fade());

        sequencer.on_track_loaded(&mut volume, &mut backend.clone());

        assert_eq!(sequencer.state(), PlaybackState::FadingOut);
        assert_eq!(backend.play_calls(), 0);
    }

    #[test]
    fn stopped_notification_mid_fade_leaves_fade_driver_in_charge() {
        let backend = MockBackend::new();
        let mut volume = VolumeControl::new();
        let mut sequencer = sequencer_of(&["a.mp3", "b.flac"]);
        sequencer.start_play(&mut backend.clone()).unwrap();
        sequencer.on_track_loaded(&mut volume, &mut backend.clone());
        assert!(sequencer.begin_fade());

        sequencer.on_track_stopped(&mut backend.clone());
        assert_eq!(sequencer.state(), PlaybackState::FadingOut);
        assert_eq!(backend.loads().len(), 1);

        sequencer.on_fade_finished();
        assert_eq!(sequencer.state(), PlaybackState::Stopped);
    }

    #[test]
    fn new_session_can_start_after_stop() {
        let backend = MockBackend::new();
        let mut volume = VolumeControl::new();
        let mut sequencer = sequencer_of(&["a.mp3", "b.flac"]);
        sequencer.start_play(&mut backend.clone()).unwrap();
        sequencer.on_track_loaded(&mut volume, &mut backend.clone());
        sequencer.stop_play(&mut backend.clone());

        // Cursor kept moving: the next session starts where the last left off.
        sequencer.start_play(&mut backend.clone()).unwrap();
        assert_eq!(sequencer.state(), PlaybackState::Loading);
        assert_eq!(backend.last_load(), Some(PathBuf::from("b.flac")));
    }
}
