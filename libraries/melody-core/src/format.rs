//! Display helpers for playback times

use std::time::Duration;

/// Render a duration as `m:ss`
///
/// Minutes are not wrapped into hours and fractional seconds are dropped,
/// so `Duration::from_secs_f64(3725.9)` renders as `62:05`.
pub fn format_duration(duration: Duration) -> String {
    let total = duration.as_secs();
    format!("{}:{:02}", total / 60, total % 60)
}

/// Render a position reported in (possibly fractional, possibly invalid) seconds
///
/// Negative and non-finite values render as `0:00`; values too large for a
/// `Duration` saturate.
pub fn format_seconds(seconds: f64) -> String {
    if seconds.is_finite() && seconds > 0.0 {
        format_duration(Duration::try_from_secs_f64(seconds).unwrap_or(Duration::MAX))
    } else {
        format_duration(Duration::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_seconds() {
        assert_eq!(format_duration(Duration::from_secs(65)), "1:05");
        assert_eq!(format_duration(Duration::ZERO), "0:00");
    }

    #[test]
    fn minutes_are_not_wrapped() {
        assert_eq!(format_duration(Duration::from_secs_f64(3725.9)), "62:05");
    }

    #[test]
    fn invalid_seconds_render_as_zero() {
        assert_eq!(format_seconds(f64::NAN), "0:00");
        assert_eq!(format_seconds(-3.0), "0:00");
        assert_eq!(format_seconds(59.99), "0:59");
    }

    #[test]
    fn huge_seconds_saturate() {
        assert_eq!(format_seconds(1e30), format_duration(Duration::MAX));
        assert_eq!(format_seconds(f64::MAX), format_duration(Duration::MAX));
    }
}
