//! Lighting zone board — reconciliation and optimistic switching.
//!
//! The board is the rendered state of the zone panel: one item per lighting
//! zone, each with a label and an on/off state. Two independent triggers
//! mutate it:
//!
//! - the periodic zones fetch, via [`ZoneBoard::reconcile`], and
//! - user activations, via [`ZoneBoard::begin_toggle`] followed later by
//!   [`ZoneBoard::resolve`] once the switch command completes.
//!
//! Reconciliation rebuilds the board only when the fetched id-set differs from
//! the rendered one. Otherwise items are patched in place and keep their
//! identity ([`ZoneItem::instance`]), so a press that is in flight still refers
//! to the item it was made on.
//!
//! The two triggers are not serialized against each other. A fetch landing
//! between an optimistic write and its resolution overwrites the optimistic
//! state; a rollback landing after a fetch overwrites the fetched state. Last
//! write wins in both directions and the next fetch converges the board.

use platform::{SwitchCommand, ZoneId, ZoneListing};

/// One rendered zone button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneItem {
    id: ZoneId,
    label: String,
    on: bool,
    instance: u64,
}

impl ZoneItem {
    /// Bridge id of the zone.
    pub fn id(&self) -> &ZoneId {
        &self.id
    }

    /// Button label (the zone name).
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Displayed on/off state.
    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Identity of this rendered item. Changes only when the item is
    /// destroyed and recreated by a rebuild.
    pub fn instance(&self) -> u64 {
        self.instance
    }
}

/// What a reconciliation pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// Every item was discarded and recreated from the listing.
    Rebuilt {
        /// Items on the board afterwards
        items: usize,
    },
    /// Items were kept; some labels or states were updated in place.
    Patched {
        /// Labels rewritten
        labels: usize,
        /// States rewritten
        states: usize,
    },
}

impl Reconciliation {
    /// `true` if anything on the board changed.
    pub fn changed(&self) -> bool {
        match *self {
            Reconciliation::Rebuilt { .. } => true,
            Reconciliation::Patched { labels, states } => labels > 0 || states > 0,
        }
    }
}

/// An optimistic write waiting for its switch command to complete.
///
/// Not `Clone`: [`ZoneBoard::resolve`] consumes it, so every optimistic write
/// is resolved exactly once.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "an optimistic write must be resolved"]
pub struct PendingCommand {
    zone: ZoneId,
    desired_on: bool,
    previous_on: bool,
    instance: u64,
}

impl PendingCommand {
    /// Zone being switched.
    pub fn zone(&self) -> &ZoneId {
        &self.zone
    }

    /// State the user asked for (already shown on the board).
    pub fn desired_on(&self) -> bool {
        self.desired_on
    }

    /// State shown before the press, restored on failure.
    pub fn previous_on(&self) -> bool {
        self.previous_on
    }

    /// The command to send to the switch sink.
    pub fn command(&self) -> SwitchCommand {
        SwitchCommand {
            room_id: self.zone.clone(),
            on: self.desired_on,
        }
    }
}

/// How a pending command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The command succeeded; the board already shows the desired state.
    Confirmed,
    /// The command failed and the item was reverted.
    RolledBack,
    /// The command failed but the item it was made on no longer exists
    /// (a rebuild replaced it); nothing was reverted.
    Orphaned,
}

/// Rendered zone items in display order.
#[derive(Debug, Default)]
pub struct ZoneBoard {
    items: Vec<ZoneItem>,
    next_instance: u64,
}

impl ZoneBoard {
    /// An empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Items in display order.
    pub fn items(&self) -> &[ZoneItem] {
        &self.items
    }

    /// The item for `id`, if rendered.
    pub fn get(&self, id: &ZoneId) -> Option<&ZoneItem> {
        self.items.iter().find(|item| item.id == *id)
    }

    fn get_mut(&mut self, id: &ZoneId) -> Option<&mut ZoneItem> {
        self.items.iter_mut().find(|item| item.id == *id)
    }

    /// Number of rendered items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// `true` if nothing is rendered.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// `true` if `listing` cannot be applied in place: the counts differ or
    /// some fetched zone has no rendered item.
    pub fn is_stale(&self, listing: &ZoneListing) -> bool {
        self.items.len() != listing.len() || listing.iter().any(|(id, _)| self.get(id).is_none())
    }

    /// Bring the board in line with a fresh listing.
    pub fn reconcile(&mut self, listing: &ZoneListing) -> Reconciliation {
        if self.is_stale(listing) {
            self.rebuild(listing);
            Reconciliation::Rebuilt {
                items: self.items.len(),
            }
        } else {
            self.patch(listing)
        }
    }

    /// Items follow the listing's payload order; no sorting is applied.
    fn rebuild(&mut self, listing: &ZoneListing) {
        self.items.clear();
        for (id, report) in listing.iter() {
            let instance = self.next_instance;
            self.next_instance = self.next_instance.wrapping_add(1);
            self.items.push(ZoneItem {
                id: id.clone(),
                label: report.name.clone(),
                on: report.state.all_on,
                instance,
            });
        }
    }

    fn patch(&mut self, listing: &ZoneListing) -> Reconciliation {
        let mut labels = 0_usize;
        let mut states = 0_usize;
        for (id, report) in listing.iter() {
            let Some(item) = self.get_mut(id) else {
                continue;
            };
            if item.label != report.name {
                item.label.clone_from(&report.name);
                labels = labels.saturating_add(1);
            }
            if item.on != report.state.all_on {
                item.on = report.state.all_on;
                states = states.saturating_add(1);
            }
        }
        Reconciliation::Patched { labels, states }
    }

    /// Optimistically flip the zone's state and return the command to send.
    ///
    /// Returns `None` if no item is rendered for `id`.
    pub fn begin_toggle(&mut self, id: &ZoneId) -> Option<PendingCommand> {
        let item = self.get_mut(id)?;
        let previous_on = item.on;
        item.on = !previous_on;
        Some(PendingCommand {
            zone: item.id.clone(),
            desired_on: item.on,
            previous_on,
            instance: item.instance,
        })
    }

    /// Settle a pending command.
    ///
    /// On failure the item is reverted to the state shown before the press,
    /// regardless of what a reconciliation may have written meanwhile.
    pub fn resolve(&mut self, pending: PendingCommand, succeeded: bool) -> Resolution {
        if succeeded {
            return Resolution::Confirmed;
        }
        match self.get_mut(&pending.zone) {
            Some(item) if item.instance == pending.instance => {
                item.on = pending.previous_on;
                Resolution::RolledBack
            }
            _ => Resolution::Orphaned,
        }
    }

    /// Text form of the board: one `[on]`/`[off]` line per item.
    pub fn render(&self) -> String {
        self.items
            .iter()
            .map(|item| {
                let marker = if item.on { "[on] " } else { "[off]" };
                format!("{marker} {}", item.label)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
