pub mod fade;
pub mod rodio_backend;
pub mod sequencer;
pub mod volume;

pub use fade::FadeOut;
pub use sequencer::{PlaybackState, Sequencer};
pub use volume::VolumeControl;
