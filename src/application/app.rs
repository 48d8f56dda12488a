use std::time::Duration;

use anyhow::Result;
use crossbeam_channel::bounded;
use log::warn;

use crate::core::events::{AppEvent, BackendEvent, EventReceiver, EventSender, UiCommand};
use crate::core::traits::{CountdownDisplay, MediaBackend};
use crate::player::{FadeOut, Sequencer, VolumeControl};
use crate::timer::Countdown;
use crate::utils::format_remaining;

/// Fade applied when the countdown runs out.
const EXPIRY_FADE: Duration = Duration::from_secs(1);

/// Shorter fade for an explicit reset.
const RESET_FADE: Duration = Duration::from_millis(500);

/// Pause between loop iterations. Well under a second, so the displayed
/// value never visibly lags the clock.
const TICK_INTERVAL: Duration = Duration::from_millis(25);

/// Main application orchestrator.
///
/// Single-threaded cooperative loop: backend notifications and UI commands
/// travel over one event channel, drained between ticks. An active fade is
/// driven from the same loop, one volume step per tick, so nothing here
/// ever blocks.
pub struct Application {
    countdown: Countdown,
    sequencer: Sequencer,
    volume: VolumeControl,
    fade: Option<FadeOut>,

    backend: Box<dyn MediaBackend>,
    display: Box<dyn CountdownDisplay>,

    event_tx: EventSender,
    event_rx: EventReceiver,

    last_shown_secs: Option<u64>,
    running: bool,
}

impl Application {
    pub fn new(
        countdown: Countdown,
        sequencer: Sequencer,
        volume: VolumeControl,
        backend: Box<dyn MediaBackend>,
        display: Box<dyn CountdownDisplay>,
    ) -> Self {
        let (tx, rx) = bounded(100);

        Self {
            countdown,
            sequencer,
            volume,
            fade: None,
            backend,
            display,
            event_tx: tx,
            event_rx: rx,
            last_shown_secs: None,
            running: false,
        }
    }

    /// Initialize the display and paint the configured duration.
    pub fn init(&mut self) -> Result<()> {
        self.display.init()?;
        self.repaint()
    }

    /// Run the main event loop until a quit command arrives.
    pub fn run(&mut self) -> Result<()> {
        self.running = true;

        while self.running {
            // Let the backend report loaded/stopped edges, then react.
            self.backend.poll(&self.event_tx);
            self.process_events()?;

            for command in self.display.poll_input()? {
                self.event_tx.send(AppEvent::Command(command))?;
            }
            self.process_events()?;

            self.drive_fade();
            self.tick()?;

            std::thread::sleep(TICK_INTERVAL);
        }

        Ok(())
    }

    /// Process all pending events in the queue
    fn process_events(&mut self) -> Result<()> {
        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_event(event)?;
        }
        Ok(())
    }

    fn handle_event(&mut self, event: AppEvent) -> Result<()> {
        match event {
            AppEvent::Backend(BackendEvent::TrackLoaded) => {
                self.sequencer
                    .on_track_loaded(&mut self.volume, self.backend.as_mut());
            }
            AppEvent::Backend(BackendEvent::TrackStopped) => {
                self.sequencer.on_track_stopped(self.backend.as_mut());
            }
            AppEvent::Command(command) => self.handle_command(command)?,
        }
        Ok(())
    }

    fn handle_command(&mut self, command: UiCommand) -> Result<()> {
        match command {
            UiCommand::StartTimer => self.start_timer(),
            UiCommand::ResetTimer => self.reset_timer()?,
            UiCommand::VolumeUp => self.volume.volume_up(self.backend.as_mut()),
            UiCommand::VolumeDown => self.volume.volume_down(self.backend.as_mut()),
            UiCommand::DurationUp => {
                self.countdown.adjust_minutes(1);
                self.repaint()?;
            }
            UiCommand::DurationDown => {
                self.countdown.adjust_minutes(-1);
                self.repaint()?;
            }
            UiCommand::Quit => self.running = false,
        }
        Ok(())
    }

    fn start_timer(&mut self) {
        if !self.countdown.start() {
            return;
        }
        // A restart can land while the previous session is still fading
        // (the restart-after-expiry window). Abandon that fade first, or
        // its completion would stop the new session's backend.
        self.cancel_fade();
        // The timer runs with or without audio.
        if let Err(e) = self.sequencer.start_play(self.backend.as_mut()) {
            warn!("countdown running without music: {e}");
        }
    }

    fn cancel_fade(&mut self) {
        if let Some(fade) = self.fade.take() {
            fade.cancel(self.backend.as_mut());
            self.sequencer.on_fade_finished();
        }
    }

    fn reset_timer(&mut self) -> Result<()> {
        self.begin_fade(RESET_FADE);
        self.countdown.reset();
        self.repaint()
    }

    fn begin_fade(&mut self, duration: Duration) {
        if self.fade.is_some() {
            return;
        }
        // Suppress auto-advance before the ramp; the stop at its end must
        // not queue another track.
        if self.sequencer.begin_fade() {
            self.fade = Some(FadeOut::begin(self.backend.as_ref(), duration));
        }
    }

    fn drive_fade(&mut self) {
        if let Some(fade) = &mut self.fade {
            if fade.tick(self.backend.as_mut()) {
                self.sequencer.on_fade_finished();
                self.fade = None;
            }
        }
    }

    /// Recompute the remaining time; push a new display value only when the
    /// shown second changed. Expiry fires once, on the tick that first
    /// reaches zero while running.
    fn tick(&mut self) -> Result<()> {
        let secs = self.countdown.remaining_secs();
        if self.last_shown_secs != Some(secs) {
            self.display.show_remaining(&format_remaining(secs))?;
            self.last_shown_secs = Some(secs);
        }

        if secs == 0 && self.countdown.is_running() {
            self.begin_fade(EXPIRY_FADE);
            self.countdown.expire();
        }
        Ok(())
    }

    fn repaint(&mut self) -> Result<()> {
        let secs = self.countdown.remaining_secs();
        self.display.show_remaining(&format_remaining(secs))?;
        self.last_shown_secs = Some(secs);
        Ok(())
    }

    /// Cleanup resources
    pub fn cleanup(&mut self) -> Result<()> {
        self.sequencer.stop_play(self.backend.as_mut());
        self.display.cleanup()
    }
}
