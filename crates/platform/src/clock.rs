//! Local wall clock abstraction

/// The device's own wall clock.
///
/// It is assumed to drift and to be in the wrong time zone; `TimeSync` in the
/// dashboard crate learns the correction against the gateway's time source.
pub trait LocalClock: Send + Sync {
    /// Milliseconds since the Unix epoch according to the local clock.
    fn now_ms(&self) -> i64;
}

/// Local clock backed by the operating system's wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl LocalClock for SystemClock {
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

impl<C: LocalClock + ?Sized> LocalClock for std::sync::Arc<C> {
    fn now_ms(&self) -> i64 {
        (**self).now_ms()
    }
}
