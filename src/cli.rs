use clap::Parser;
use std::path::PathBuf;

use crate::utils::APP_NAME;

#[derive(Parser, Debug)]
#[command(name = APP_NAME)]
#[command(about = "LED countdown timer with background music", long_about = None)]
pub struct Cli {
    /// Timer duration in minutes
    #[arg(short, long)]
    pub minutes: Option<f64>,

    /// Directory to scan for music
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Music file to append to the playlist; may be given multiple times
    #[arg(short, long = "file", value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Playlist position to start from
    #[arg(short, long)]
    pub position: Option<usize>,

    /// Initial volume percentage (0-100)
    #[arg(short, long)]
    pub volume: Option<u8>,
}
