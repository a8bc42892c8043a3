//! Clock face: date and time regions.

use std::sync::{Arc, Mutex};

use platform::{Region, Surface};
use ui::{format_date, format_time, Locale, RenderedContent};

use super::write_region;
use crate::scheduler::Tick;
use crate::time_sync::OffsetProvider;

/// Renders the corrected time. Date and time are cached separately, so a
/// minute rollover only rewrites the time region.
pub struct ClockModule<O, S> {
    offsets: Arc<O>,
    surface: S,
    locale: Locale,
    date: Mutex<RenderedContent>,
    time: Mutex<RenderedContent>,
}

impl<O: OffsetProvider, S: Surface> ClockModule<O, S> {
    /// Create a clock face reading `offsets`.
    pub fn new(offsets: Arc<O>, surface: S, locale: Locale) -> Self {
        Self {
            offsets,
            surface,
            locale,
            date: Mutex::new(RenderedContent::new()),
            time: Mutex::new(RenderedContent::new()),
        }
    }

    /// Render both regions; returns the number of physical writes.
    pub fn render(&self) -> usize {
        let now = self.offsets.corrected_now();
        let date = write_region(&self.date, &self.surface, Region::Date, &format_date(now, &self.locale));
        let time = write_region(&self.time, &self.surface, Region::Time, &format_time(now));
        usize::from(date).saturating_add(usize::from(time))
    }
}

impl<O, S> Tick for ClockModule<O, S>
where
    O: OffsetProvider + 'static,
    S: Surface + 'static,
{
    async fn tick(&self) {
        self.render();
    }
}
