//! Lighting zone control panel.
//!
//! Two independent triggers touch the zone board: the 10 s poll
//! ([`ControlPanel::refresh`]) and user activations
//! ([`ControlPanel::activate`]). Each activation runs its switch command on
//! its own task, so presses on different zones never wait for each other.
//! A poll and a command on the same zone may interleave; the later write
//! wins and the next poll converges the board.

use std::sync::{Arc, Mutex};

use platform::config::ZONES_INTERVAL;
use platform::{Gateway, InputDevice, InputEvent, Region, Surface, ZoneId};
use tokio::task::JoinHandle;
use ui::{PendingCommand, Reconciliation, RenderedContent, Resolution, ZoneBoard, ZoneItem};

use super::{lock, log_fetch_failure, write_region};
use crate::scheduler::{spawn_periodic, FirstTick, TaskHandle, Tick};

/// Tasks started by [`ControlPanel::start`].
#[derive(Debug)]
pub struct PanelTasks {
    /// The periodic zones poll.
    pub poll: TaskHandle,
    /// The input dispatch loop.
    pub input: TaskHandle,
}

/// Zone panel: reconciliation plus optimistic switching.
pub struct ControlPanel<G, S> {
    gateway: Arc<G>,
    surface: S,
    board: Mutex<ZoneBoard>,
    rendered: Mutex<RenderedContent>,
}

impl<G: Gateway, S: Surface> ControlPanel<G, S> {
    /// Create an empty panel.
    pub fn new(gateway: Arc<G>, surface: S) -> Self {
        Self {
            gateway,
            surface,
            board: Mutex::new(ZoneBoard::new()),
            rendered: Mutex::new(RenderedContent::new()),
        }
    }

    /// Snapshot of the rendered items.
    pub fn items(&self) -> Vec<ZoneItem> {
        lock(&self.board).items().to_vec()
    }

    /// Displayed state of zone `id`.
    pub fn is_on(&self, id: &ZoneId) -> Option<bool> {
        lock(&self.board).get(id).map(ZoneItem::is_on)
    }

    /// Fetch the zones and reconcile the board against them.
    ///
    /// Returns `None` if the fetch failed (the board is left as it is).
    pub async fn refresh(&self) -> Option<Reconciliation> {
        let listing = match self.gateway.fetch_zones().await {
            Ok(listing) => listing,
            Err(err) => {
                log_fetch_failure("zones", &err);
                return None;
            }
        };
        let outcome = lock(&self.board).reconcile(&listing);
        match outcome {
            Reconciliation::Rebuilt { items } => tracing::info!(items, "zone board rebuilt"),
            Reconciliation::Patched { labels, states } => {
                tracing::debug!(labels, states, "zone board patched");
            }
        }
        self.render();
        Some(outcome)
    }

    /// Write the board to the zones region if it changed.
    pub fn render(&self) -> bool {
        let text = lock(&self.board).render();
        write_region(&self.rendered, &self.surface, Region::Zones, &text)
    }

    async fn complete(&self, pending: PendingCommand) -> Resolution {
        let command = pending.command();
        let result = self.gateway.switch_zone(command).await;
        let zone = pending.zone().clone();
        let resolution = lock(&self.board).resolve(pending, result.is_ok());
        match (resolution, result) {
            (Resolution::Confirmed, _) => tracing::debug!(%zone, "switch confirmed"),
            (Resolution::RolledBack, Err(err)) => {
                tracing::warn!(%zone, error = %err, "switch failed, rolled back");
                self.render();
            }
            (Resolution::Orphaned, Err(err)) => {
                tracing::warn!(%zone, error = %err, "switch failed after the item was rebuilt");
            }
            (_, Ok(())) => {}
        }
        resolution
    }
}

impl<G, S> ControlPanel<G, S>
where
    G: Gateway,
    S: Surface + 'static,
{
    /// Flip zone `id` on the display now and send the switch command.
    ///
    /// Returns `None` for a zone that is not on the board. The handle yields
    /// how the command ended; it may be dropped without affecting the
    /// command.
    pub fn activate(self: &Arc<Self>, id: &ZoneId) -> Option<JoinHandle<Resolution>> {
        let Some(pending) = lock(&self.board).begin_toggle(id) else {
            tracing::debug!(zone = %id, "activation for a zone not on the board");
            return None;
        };
        tracing::info!(zone = %id, on = pending.desired_on(), "switching zone");
        self.render();
        let panel = Arc::clone(self);
        Some(tokio::spawn(async move { panel.complete(pending).await }))
    }

    /// Start the periodic poll: an immediate fetch, then every 10 s.
    pub fn start_polling(self: &Arc<Self>) -> TaskHandle {
        spawn_periodic("zones", ZONES_INTERVAL, FirstTick::Immediate, Arc::clone(self))
    }

    /// Start the poll plus one dispatch loop serving every zone on the board.
    pub fn start<I: InputDevice>(self: &Arc<Self>, mut input: I) -> PanelTasks {
        let poll = self.start_polling();
        let panel = Arc::clone(self);
        let input = TaskHandle::spawn("zones-input", async move {
            while let Some(event) = input.wait_for_event().await {
                match event {
                    InputEvent::Activate(zone) => {
                        panel.activate(&zone);
                    }
                }
            }
            tracing::debug!("input closed");
        });
        PanelTasks { poll, input }
    }
}

impl<G: Gateway, S: Surface + 'static> Tick for ControlPanel<G, S> {
    async fn tick(&self) {
        self.refresh().await;
    }
}
