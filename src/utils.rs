pub const APP_NAME: &str = "music-timer";

pub const ALLOWED_EXTENSIONS: &[&str] = &["flac", "mp3", "ogg"];

/// Convert a user volume percentage (0-100) to the backend level (0.0-1.0).
///
/// The backend works in a unit-interval fraction; the UI and CLI work in
/// whole percent. Input above 100 is clamped.
pub fn volume_percent_to_level(percent: u8) -> f32 {
    (percent.min(100) as f32) / 100.0
}

/// Convert a backend level (0.0-1.0) back to a user volume percentage (0-100).
///
/// Inverse of `volume_percent_to_level`, rounding half-up so the pair
/// round-trips exactly for every integer percentage.
pub fn level_to_volume_percent(level: f32) -> u8 {
    (level.clamp(0.0, 1.0) * 100.0).round() as u8
}

/// Format remaining whole seconds as `M:SS` (minutes unpadded, seconds
/// zero-padded), e.g. `2:05`.
pub fn format_remaining(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_round_trips_for_every_percentage() {
        for percent in 0..=100u8 {
            let level = volume_percent_to_level(percent);
            assert_eq!(level_to_volume_percent(level), percent);
        }
    }

    #[test]
    fn percent_input_is_clamped_to_100() {
        assert_eq!(volume_percent_to_level(250), 1.0);
    }

    #[test]
    fn level_outside_unit_interval_is_clamped() {
        assert_eq!(level_to_volume_percent(-0.5), 0);
        assert_eq!(level_to_volume_percent(1.7), 100);
    }

    #[test]
    fn remaining_is_formatted_as_minutes_and_padded_seconds() {
        assert_eq!(format_remaining(0), "0:00");
        assert_eq!(format_remaining(5), "0:05");
        assert_eq!(format_remaining(59), "0:59");
        assert_eq!(format_remaining(60), "1:00");
        assert_eq!(format_remaining(125), "2:05");
        assert_eq!(format_remaining(600), "10:00");
    }
}
