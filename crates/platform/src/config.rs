//! Application configuration and constants
//!
//! Cadences and layout limits shared across the workspace. All modules
//! should reference these constants rather than hardcoding values.

use core::time::Duration;

/// The application name
pub const APP_NAME: &str = "Ambient Display";

/// Application version (synchronized with Cargo.toml)
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// How often the clock offset is relearned from the time source.
pub const TIME_SYNC_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// Clock face tick. Seconds are not shown; a 1 s tick keeps the minute
/// rollover accurate to about a second.
pub const CLOCK_INTERVAL: Duration = Duration::from_secs(1);

/// Weather refetch cadence.
pub const WEATHER_INTERVAL: Duration = Duration::from_secs(3 * 60);

/// Bus departures refetch cadence.
pub const BUSES_INTERVAL: Duration = Duration::from_secs(60);

/// Train departures refetch cadence.
pub const TRAINS_INTERVAL: Duration = Duration::from_secs(2 * 60);

/// Lighting zone refetch cadence.
pub const ZONES_INTERVAL: Duration = Duration::from_secs(10);

/// Anti-ghosting blackout cadence.
pub const BLACKOUT_INTERVAL: Duration = Duration::from_secs(3 * 60 * 60);

/// How long the panel stays black during a blackout.
pub const BLACKOUT_HOLD: Duration = Duration::from_millis(500);

/// Maximum number of rows on each departure board.
pub const DEPARTURE_ROWS: usize = 5;

/// Forecast strip width. Hourly point 0 is the current hour and is skipped,
/// so this shows `FORECAST_COLUMNS - 1` hours.
pub const FORECAST_COLUMNS: usize = 14;

/// Milliseconds per minute, for the zone offset reported in minutes.
pub const MS_PER_MINUTE: i64 = 60_000;

/// Full application title (name + version)
pub fn app_title() -> String {
    format!("{APP_NAME} v{APP_VERSION}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cadences_are_ordered_by_staleness_tolerance() {
        assert!(CLOCK_INTERVAL < ZONES_INTERVAL);
        assert!(ZONES_INTERVAL < BUSES_INTERVAL);
        assert!(BUSES_INTERVAL < TRAINS_INTERVAL);
        assert!(TRAINS_INTERVAL < WEATHER_INTERVAL);
        assert!(WEATHER_INTERVAL < TIME_SYNC_INTERVAL);
        assert!(TIME_SYNC_INTERVAL < BLACKOUT_INTERVAL);
    }

    #[test]
    fn blackout_hold_is_half_a_second() {
        assert_eq!(BLACKOUT_HOLD.as_millis(), 500);
    }

    #[test]
    fn app_title_contains_name() {
        assert!(app_title().starts_with(APP_NAME));
    }
}
