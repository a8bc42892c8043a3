//! Anti-ghosting blackout.

use core::time::Duration;

use platform::Surface;

use crate::scheduler::Tick;

/// Periodically blanks the whole panel for a short hold, then restores it.
/// Independent of all data fetches.
pub struct Blackout<S> {
    surface: S,
    hold: Duration,
}

impl<S: Surface> Blackout<S> {
    /// Blank for `hold` on every fire.
    pub fn new(surface: S, hold: Duration) -> Self {
        Self { surface, hold }
    }

    /// Blank, wait `hold`, restore. Returns `false` if the panel refused to
    /// blank.
    ///
    /// A refused restore is retried once per `hold` until the panel accepts
    /// it; the panel never stays black past the failing attempts.
    pub async fn fire(&self) -> bool {
        if let Err(err) = self.surface.set_blackout(true) {
            tracing::warn!(error = %err, "blackout refused");
            return false;
        }
        tracing::debug!(hold = ?self.hold, "blackout");
        let mut attempt: u32 = 1;
        loop {
            tokio::time::sleep(self.hold).await;
            match self.surface.set_blackout(false) {
                Ok(()) => return true,
                Err(err) => {
                    tracing::error!(error = %err, attempt, "restore after blackout failed, retrying");
                    attempt = attempt.saturating_add(1);
                }
            }
        }
    }
}

impl<S: Surface + 'static> Tick for Blackout<S> {
    async fn tick(&self) {
        self.fire().await;
    }
}
