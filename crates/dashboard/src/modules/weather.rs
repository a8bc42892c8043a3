//! Weather block.

use std::sync::{Arc, Mutex};

use platform::{Gateway, Region, Surface, WeatherReport};
use ui::{render_weather, RenderedContent};

use super::{lock, log_fetch_failure, write_region};
use crate::scheduler::Tick;
use crate::time_sync::{OffsetProvider, Subscription, TimeSync};

/// Polls the weather source and renders the block.
///
/// Hour labels depend on the timezone offset, so the module also re-renders
/// the last report whenever [`TimeSync`] publishes a change (see
/// [`WeatherModule::attach`]).
pub struct WeatherModule<G, O, S> {
    gateway: Arc<G>,
    offsets: Arc<O>,
    surface: S,
    columns: usize,
    report: Mutex<Option<WeatherReport>>,
    rendered: Mutex<RenderedContent>,
}

impl<G, O, S> WeatherModule<G, O, S>
where
    G: Gateway,
    O: OffsetProvider,
    S: Surface,
{
    /// Create a weather module showing `columns` forecast columns.
    pub fn new(gateway: Arc<G>, offsets: Arc<O>, surface: S, columns: usize) -> Self {
        Self {
            gateway,
            offsets,
            surface,
            columns,
            report: Mutex::new(None),
            rendered: Mutex::new(RenderedContent::new()),
        }
    }

    /// Fetch and render. Returns `true` if the region was rewritten.
    pub async fn refresh(&self) -> bool {
        match self.gateway.fetch_weather().await {
            Ok(report) => {
                *lock(&self.report) = Some(report);
                self.render()
            }
            Err(err) => {
                log_fetch_failure("weather", &err);
                false
            }
        }
    }

    /// Re-render the last fetched report with the current timezone offset.
    pub fn render(&self) -> bool {
        let block = lock(&self.report)
            .as_ref()
            .map(|report| render_weather(report, self.offsets.timezone_offset_ms(), self.columns));
        match block {
            Some(block) => write_region(&self.rendered, &self.surface, Region::Weather, &block),
            None => false,
        }
    }
}

impl<G, O, S> WeatherModule<G, O, S>
where
    G: Gateway,
    O: OffsetProvider + 'static,
    S: Surface + 'static,
{
    /// Re-render on every offset change published by `time_sync`.
    ///
    /// The listener holds a weak reference; once the module is dropped it
    /// does nothing. Pass the returned token to [`TimeSync::unsubscribe`] to
    /// remove it.
    pub fn attach<T: Gateway>(self: &Arc<Self>, time_sync: &TimeSync<T>) -> Subscription {
        let module = Arc::downgrade(self);
        time_sync.subscribe(move |offset| {
            if let Some(module) = module.upgrade() {
                tracing::debug!(timezone_offset_ms = offset.timezone_offset_ms, "re-rendering weather");
                module.render();
            }
        })
    }
}

impl<G, O, S> Tick for WeatherModule<G, O, S>
where
    G: Gateway,
    O: OffsetProvider + 'static,
    S: Surface + 'static,
{
    async fn tick(&self) {
        self.refresh().await;
    }
}
