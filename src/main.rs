mod application;
mod cli;
mod config;
mod core;
mod library;
mod player;
mod timer;
mod ui;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::{info, warn};

use crate::application::Application;
use crate::cli::Cli;
use crate::config::Config;
use crate::library::Playlist;
use crate::player::rodio_backend::RodioBackend;
use crate::player::{Sequencer, VolumeControl};
use crate::timer::Countdown;
use crate::ui::LedClockDisplay;

const DEFAULT_MINUTES: f64 = 2.0;

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = Config::load();

    let minutes = cli.minutes.or(config.minutes).unwrap_or(DEFAULT_MINUTES);

    let mut playlist = Playlist::new();
    if let Some(dir) = cli.dir.as_deref().or(config.music_dir.as_deref()) {
        // A failed scan leaves the timer usable, just silent.
        if let Err(e) = playlist.add_from_directory(dir) {
            warn!("{e}");
        }
    }
    for file in &cli.files {
        if let Err(e) = playlist.add_from_file(file) {
            warn!("skipping {}: {e}", file.display());
        }
    }
    if playlist.is_empty() {
        warn!("playlist is empty; the timer will run without music");
    } else {
        info!("playlist holds {} track(s)", playlist.len());
    }

    let mut sequencer = Sequencer::new(playlist);
    if let Some(position) = cli.position {
        sequencer.set_position(position);
    }

    let mut backend = RodioBackend::new().context("failed to open audio output")?;
    let mut volume = VolumeControl::new();
    if let Some(percent) = cli.volume.or(config.volume) {
        // Routed through the controller: a backend that has not started
        // yet takes this as a pending level, applied on the first load.
        volume.set_percent(&mut backend, percent);
    }

    let mut app = Application::new(
        Countdown::from_minutes(minutes),
        sequencer,
        volume,
        Box::new(backend),
        Box::new(LedClockDisplay::new()),
    );

    app.init()?;
    let result = app.run();
    app.cleanup()?;
    result
}
