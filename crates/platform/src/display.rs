//! Display abstraction layer
//!
//! The panel is addressed by region rather than by pixel: each module owns
//! exactly one region (the clock owns two) and replaces its whole content on
//! every write. On e-paper every write is a physical refresh, so callers are
//! expected to guard writes with an idempotence check (see `ui::RenderedContent`).

use thiserror::Error;

/// Independently rewritable areas of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    /// Weekday, day of month and month name
    Date,
    /// Hours and minutes
    Time,
    /// Current conditions plus the hourly forecast strip
    Weather,
    /// Bus departure board
    Buses,
    /// Train departure board
    Trains,
    /// Lighting zone buttons
    Zones,
}

impl Region {
    /// All regions in top-to-bottom screen order.
    pub const ALL: [Region; 6] = [
        Region::Date,
        Region::Time,
        Region::Weather,
        Region::Buses,
        Region::Trains,
        Region::Zones,
    ];

    /// Stable lowercase name, used in logs and by the console surface.
    pub const fn name(self) -> &'static str {
        match self {
            Region::Date => "date",
            Region::Time => "time",
            Region::Weather => "weather",
            Region::Buses => "buses",
            Region::Trains => "trains",
            Region::Zones => "zones",
        }
    }
}

impl core::fmt::Display for Region {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Display surface the modules render into.
///
/// Implementations use interior mutability: the surface is shared between
/// every module task and written from whichever task is ticking.
pub trait Surface: Send + Sync {
    /// Replace the content of `region`.
    ///
    /// Each call is a physical redraw of that region on e-paper hardware.
    fn write(&self, region: Region, content: &str) -> Result<(), DisplayError>;

    /// Fill the whole panel with solid black (`true`) or restore it (`false`).
    ///
    /// Restoring must bring back the previously written region contents
    /// without the modules having to re-render them.
    fn set_blackout(&self, active: bool) -> Result<(), DisplayError>;
}

impl<S: Surface + ?Sized> Surface for std::sync::Arc<S> {
    fn write(&self, region: Region, content: &str) -> Result<(), DisplayError> {
        (**self).write(region, content)
    }

    fn set_blackout(&self, active: bool) -> Result<(), DisplayError> {
        (**self).set_blackout(active)
    }
}

/// Display errors
#[derive(Debug, Error)]
pub enum DisplayError {
    /// The underlying output failed
    #[error("display write failed: {0}")]
    Io(#[from] std::io::Error),
    /// The panel is still busy with a previous refresh
    #[error("display is busy")]
    Busy,
    /// The panel refused the write
    #[error("display rejected write to region {0}")]
    Rejected(Region),
}

#[cfg(test)]
mod tests {
    use super::Region;

    #[test]
    fn region_names_are_unique() {
        let mut names: Vec<&str> = Region::ALL.iter().map(|r| r.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Region::ALL.len());
    }

    #[test]
    fn region_display_matches_name() {
        assert_eq!(Region::Buses.to_string(), "buses");
    }
}
