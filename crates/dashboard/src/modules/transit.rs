//! Departure boards.

use std::sync::{Arc, Mutex};

use platform::{Gateway, Surface, TransitKind};
use ui::{render_departures, RenderedContent};

use super::{log_fetch_failure, write_region};
use crate::scheduler::Tick;

/// One departure board. Buses and trains run as two independent instances.
pub struct TransitModule<G, S> {
    gateway: Arc<G>,
    surface: S,
    kind: TransitKind,
    caption: String,
    rows: usize,
    rendered: Mutex<RenderedContent>,
}

impl<G: Gateway, S: Surface> TransitModule<G, S> {
    /// Create a board for `kind` showing at most `rows` departures.
    pub fn new(gateway: Arc<G>, surface: S, kind: TransitKind, caption: impl Into<String>, rows: usize) -> Self {
        Self {
            gateway,
            surface,
            kind,
            caption: caption.into(),
            rows,
            rendered: Mutex::new(RenderedContent::new()),
        }
    }

    /// Which board this is.
    pub fn kind(&self) -> TransitKind {
        self.kind
    }

    /// Fetch and render. Returns `true` if the region was rewritten.
    pub async fn refresh(&self) -> bool {
        match self.gateway.fetch_transit(self.kind).await {
            Ok(report) => {
                let board = render_departures(&self.caption, report.departures(), self.rows);
                write_region(&self.rendered, &self.surface, self.kind.region(), &board)
            }
            Err(err) => {
                log_fetch_failure(self.kind.name(), &err);
                false
            }
        }
    }
}

impl<G: Gateway, S: Surface + 'static> Tick for TransitModule<G, S> {
    async fn tick(&self) {
        self.refresh().await;
    }
}
