pub mod countdown;

pub use countdown::{Countdown, CountdownState};
