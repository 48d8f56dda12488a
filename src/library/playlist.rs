use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use crate::core::error::PlayerError;
use crate::utils::ALLOWED_EXTENSIONS;

/// A validated audio file reference. Immutable once constructed: the
/// extension has been checked against the allow-set and the path has been
/// lexically normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    path: PathBuf,
}

impl Track {
    pub fn new(path: &Path) -> Result<Self, PlayerError> {
        if !has_allowed_extension(path) {
            return Err(PlayerError::UnsupportedExtension {
                path: path.to_path_buf(),
            });
        }
        Ok(Self {
            path: normalize(path),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn has_allowed_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| ALLOWED_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Lexical normalization: drop `.` components and redundant separators,
/// resolve `..` against a preceding normal component. No filesystem access.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Ordered, append-only collection of tracks with a circular cursor.
///
/// The cursor always stays in `[0, len)` while the playlist is non-empty
/// and advances modulo the length, so playback wraps around instead of
/// running off the end.
#[derive(Debug, Clone, Default)]
pub struct Playlist {
    tracks: Vec<Track>,
    cursor: usize,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Index of the next track `next_track` will return.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Append every allowed audio file directly inside `dir`, sorted
    /// lexicographically. Files with other extensions are skipped; the scan
    /// is flat, not recursive.
    pub fn add_from_directory(&mut self, dir: &Path) -> Result<usize, PlayerError> {
        let mut found = Vec::new();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|source| PlayerError::DirectoryScan {
                path: dir.to_path_buf(),
                source,
            })?;
            if !entry.path().is_file() || !has_allowed_extension(entry.path()) {
                continue;
            }
            found.push(normalize(entry.path()));
        }
        found.sort();

        let added = found.len();
        self.tracks
            .extend(found.into_iter().map(|path| Track { path }));
        Ok(added)
    }

    /// Append a single file. Unlike the directory scan, a disallowed
    /// extension here is an error, not a skip.
    pub fn add_from_file(&mut self, path: &Path) -> Result<(), PlayerError> {
        let track = Track::new(path)?;
        self.tracks.push(track);
        Ok(())
    }

    /// Return the track at the cursor and advance it circularly. This is
    /// the only place the cursor moves forward.
    pub fn next_track(&mut self) -> Result<Track, PlayerError> {
        if self.tracks.is_empty() {
            return Err(PlayerError::EmptyPlaylist);
        }
        let track = self.tracks[self.cursor].clone();
        self.cursor = (self.cursor + 1) % self.tracks.len();
        Ok(track)
    }

    /// Move the cursor; any index is accepted and wrapped into range.
    /// Does not trigger a load. No-op on an empty playlist.
    pub fn set_position(&mut self, index: usize) {
        if !self.tracks.is_empty() {
            self.cursor = index % self.tracks.len();
        }
    }
}
