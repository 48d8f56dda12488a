pub mod playlist;

pub use playlist::{Playlist, Track};
