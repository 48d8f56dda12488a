//! Error types for the playback engine.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlayerError {
    /// An operation that needs at least one track found none.
    #[error("playlist is empty")]
    EmptyPlaylist,

    /// A file was offered whose extension is not in the allow-set.
    #[error("unsupported file extension: {}", path.display())]
    UnsupportedExtension { path: PathBuf },

    /// A music directory could not be listed.
    #[error("cannot list music directory {}: {source}", path.display())]
    DirectoryScan {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// The media backend failed to load or decode a track.
    #[error("media backend error: {0}")]
    Backend(#[from] anyhow::Error),
}
