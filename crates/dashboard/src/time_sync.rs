//! Clock correction against the gateway's time source.
//!
//! The device clock drifts and does not know the display's time zone. Each
//! sync round learns two offsets:
//!
//! - `clock_offset_ms`: authoritative UTC minus the local clock, captured once
//!   after the response arrives (network latency is folded into the offset)
//! - `timezone_offset_ms`: the display zone's offset from UTC
//!
//! Displays read the *sum* of both through [`OffsetProvider`]. Listeners are
//! called synchronously, once per round, only when either offset changed.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use platform::{Gateway, LocalClock, TimeReport};

use crate::modules::log_fetch_failure;
use crate::scheduler::Tick;

/// Offsets learned from the last successful sync.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClockOffset {
    /// Display time zone offset from UTC.
    pub timezone_offset_ms: i64,
    /// Authoritative UTC minus local clock.
    pub clock_offset_ms: i64,
}

impl ClockOffset {
    /// Sum of both offsets; the only form used for display.
    pub fn combined_ms(&self) -> i64 {
        self.timezone_offset_ms.saturating_add(self.clock_offset_ms)
    }
}

/// Read access to the learned correction.
pub trait OffsetProvider: Send + Sync {
    /// Clock plus timezone offset.
    fn combined_offset_ms(&self) -> i64;

    /// Timezone component alone, for labelling UTC timestamps from the data
    /// sources.
    fn timezone_offset_ms(&self) -> i64;

    /// Local clock plus the combined offset.
    fn corrected_now_ms(&self) -> i64;

    /// [`Self::corrected_now_ms`] as a date-time whose UTC fields are the
    /// display zone's wall-clock fields.
    fn corrected_now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.corrected_now_ms()).unwrap_or_default()
    }
}

/// Token returned by [`TimeSync::subscribe`].
#[derive(Debug, PartialEq, Eq, Hash)]
#[must_use = "dropping the token makes the listener impossible to remove"]
pub struct Subscription(u64);

type Listener = Arc<dyn Fn(ClockOffset) + Send + Sync>;

struct SyncState {
    offset: ClockOffset,
    listeners: Vec<(u64, Listener)>,
    next_subscription: u64,
}

/// Learns and publishes the clock correction.
pub struct TimeSync<G> {
    gateway: Arc<G>,
    clock: Box<dyn LocalClock>,
    state: Mutex<SyncState>,
}

impl<G: Gateway> TimeSync<G> {
    /// Create with a zero offset; nothing is fetched until [`Self::sync`].
    pub fn new<C: LocalClock + 'static>(gateway: Arc<G>, clock: C) -> Self {
        Self {
            gateway,
            clock: Box::new(clock),
            state: Mutex::new(SyncState {
                offset: ClockOffset::default(),
                listeners: Vec::new(),
                next_subscription: 0,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, SyncState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current offsets.
    pub fn offset(&self) -> ClockOffset {
        self.state().offset
    }

    /// Register `listener` for offset changes.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(ClockOffset) + Send + Sync + 'static,
    {
        let mut state = self.state();
        let id = state.next_subscription;
        state.next_subscription = state.next_subscription.wrapping_add(1);
        state.listeners.push((id, Arc::new(listener)));
        Subscription(id)
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        let mut state = self.state();
        let before = state.listeners.len();
        state.listeners.retain(|(id, _)| *id != subscription.0);
        state.listeners.len() != before
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.state().listeners.len()
    }

    /// One round: fetch the time source and apply the result.
    ///
    /// Returns `true` if the offset changed. On failure the previous offset
    /// is kept.
    pub async fn sync(&self) -> bool {
        match self.gateway.fetch_time().await {
            Ok(report) => self.apply(&report),
            Err(err) => {
                log_fetch_failure("time", &err);
                false
            }
        }
    }

    /// Learn the offsets from `report`, reading the local clock now.
    ///
    /// Returns `true` and notifies listeners if either offset changed.
    pub fn apply(&self, report: &TimeReport) -> bool {
        let local_now = self.clock.now_ms();
        let next = ClockOffset {
            timezone_offset_ms: report.zone_offset_ms(),
            clock_offset_ms: report.utc.saturating_sub(local_now),
        };

        let listeners: Vec<Listener> = {
            let mut state = self.state();
            if state.offset == next {
                tracing::debug!(combined_ms = next.combined_ms(), "clock offset unchanged");
                return false;
            }
            state.offset = next;
            state.listeners.iter().map(|(_, l)| Arc::clone(l)).collect()
        };

        tracing::info!(
            zone = %report.zone_name,
            clock_offset_ms = next.clock_offset_ms,
            timezone_offset_ms = next.timezone_offset_ms,
            "clock offset updated"
        );
        for listener in listeners {
            listener(next);
        }
        true
    }
}

impl<G: Gateway> OffsetProvider for TimeSync<G> {
    fn combined_offset_ms(&self) -> i64 {
        self.offset().combined_ms()
    }

    fn timezone_offset_ms(&self) -> i64 {
        self.offset().timezone_offset_ms
    }

    fn corrected_now_ms(&self) -> i64 {
        self.clock.now_ms().saturating_add(self.combined_offset_ms())
    }
}

impl<G: Gateway> Tick for TimeSync<G> {
    async fn tick(&self) {
        self.sync().await;
    }
}
