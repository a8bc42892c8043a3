//! Periodic task scheduling.
//!
//! Every module runs on its own tokio task driven by a fixed-period interval.
//! The returned [`TaskHandle`] owns the task: cancelling or dropping it aborts
//! the loop, so tests (and [`crate::Dashboard`]) get scoped timers.

use core::future::Future;
use core::time::Duration;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// One round of periodic work.
///
/// A tick must not fail: errors are logged inside and the next tick retries.
pub trait Tick: Send + Sync + 'static {
    /// Run one round.
    fn tick(&self) -> impl Future<Output = ()> + Send;
}

/// When the first tick of a periodic task fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirstTick {
    /// Right away, then every period.
    Immediate,
    /// After one full period.
    AfterPeriod,
}

/// Owner of a spawned task. Dropping the handle aborts the task.
#[derive(Debug)]
pub struct TaskHandle {
    name: &'static str,
    task: JoinHandle<()>,
}

impl TaskHandle {
    /// Spawn `future` on the current runtime under `name`.
    pub fn spawn<F>(name: &'static str, future: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self {
            name,
            task: tokio::spawn(future),
        }
    }

    /// Task name, for logs.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// `true` once the task has stopped (it finished or was aborted).
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stop the task. Equivalent to dropping the handle.
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        if !self.task.is_finished() {
            tracing::debug!(task = self.name, "cancelling task");
        }
        self.task.abort();
    }
}

/// Run `work` every `period`.
///
/// Ticks never overlap: a tick that takes longer than the period delays the
/// following ones instead of bursting to catch up.
pub fn spawn_periodic<T: Tick>(
    name: &'static str,
    period: Duration,
    first: FirstTick,
    work: Arc<T>,
) -> TaskHandle {
    TaskHandle::spawn(name, async move {
        let now = Instant::now();
        let start = match first {
            FirstTick::Immediate => now,
            FirstTick::AfterPeriod => now.checked_add(period).unwrap_or(now),
        };
        let mut interval = tokio::time::interval_at(start, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tracing::debug!(task = name, ?period, ?first, "periodic task started");
        loop {
            interval.tick().await;
            tracing::trace!(task = name, "tick");
            work.tick().await;
        }
    })
}
