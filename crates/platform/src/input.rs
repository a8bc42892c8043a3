//! Input device abstraction

use core::future::Future;

use crate::contract::ZoneId;

/// Source of user activations.
///
/// One device feeds the whole zone panel; the panel dispatches each event to
/// the zone it names, so a single handler serves every rendered button.
pub trait InputDevice: Send + 'static {
    /// Wait for the next event. `None` means the source is closed and no
    /// further events will arrive.
    fn wait_for_event(&mut self) -> impl Future<Output = Option<InputEvent>> + Send;
}

/// Input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// The button for this zone was pressed
    Activate(ZoneId),
}
