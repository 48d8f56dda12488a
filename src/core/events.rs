/// All events that can occur in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// Asynchronous notification from the media backend
    Backend(BackendEvent),

    /// User command from the display shell
    Command(UiCommand),
}

/// Notifications the media backend delivers after `load`/`stop` complete
/// asynchronously.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendEvent {
    /// The requested track finished loading and is ready to play
    TrackLoaded,

    /// The current track stopped (end of track or explicit stop)
    TrackStopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiCommand {
    /// Start the countdown (and playback) via click or key
    StartTimer,

    /// Stop the countdown early and fade playback out
    ResetTimer,

    /// Raise the volume by one step
    VolumeUp,

    /// Lower the volume by one step
    VolumeDown,

    /// Add one minute to the configured duration
    DurationUp,

    /// Remove one minute from the configured duration
    DurationDown,

    /// Quit the application
    Quit,
}

/// Type alias for event sender
pub type EventSender = crossbeam_channel::Sender<AppEvent>;

/// Type alias for event receiver
pub type EventReceiver = crossbeam_channel::Receiver<AppEvent>;
