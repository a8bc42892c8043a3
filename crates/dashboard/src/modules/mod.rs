//! Display modules.
//!
//! Each module owns one or more display regions, polls one data source on its
//! own cadence, and writes through a [`RenderedContent`] guard so unchanged
//! content never reaches the panel.

pub mod blackout;
pub mod clock;
pub mod transit;
pub mod weather;
pub mod zones;

use std::sync::{Mutex, MutexGuard, PoisonError};

use platform::{GatewayError, Region, Surface};
use ui::RenderedContent;

pub use blackout::Blackout;
pub use clock::ClockModule;
pub use transit::TransitModule;
pub use weather::WeatherModule;
pub use zones::{ControlPanel, PanelTasks};

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Idempotent write. Failures are logged and reported as "nothing written";
/// the cache keeps the old content so the next render retries.
pub(crate) fn write_region<S: Surface + ?Sized>(
    cache: &Mutex<RenderedContent>,
    surface: &S,
    region: Region,
    content: &str,
) -> bool {
    match lock(cache).write_if_changed(surface, region, content) {
        Ok(written) => written,
        Err(err) => {
            tracing::warn!(%region, error = %err, "display write failed");
            false
        }
    }
}

/// A failed fetch leaves the previous render in place. Contract violations
/// are faults on the gateway side and are logged louder.
pub(crate) fn log_fetch_failure(source: &str, err: &GatewayError) {
    if err.is_contract_violation() {
        tracing::error!(source, error = %err, "gateway response violates contract");
    } else {
        tracing::warn!(source, error = %err, "fetch failed, keeping previous render");
    }
}
