pub mod led;
pub mod tui;

pub use tui::LedClockDisplay;
