//! Data gateway abstraction
//!
//! The gateway is the only source of external data. Every method is a single
//! request/response exchange; retry policy belongs to the caller (which, for
//! this client, simply waits for its next scheduled tick).

use core::future::Future;

use thiserror::Error;

use crate::contract::{SwitchCommand, TimeReport, TransitReport, WeatherReport, ZoneListing};
use crate::display::Region;

/// Which departure board a transit request is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitKind {
    /// Bus stops
    Buses,
    /// Rail stations
    Trains,
}

impl TransitKind {
    /// Gateway path serving this board.
    pub const fn path(self) -> &'static str {
        match self {
            TransitKind::Buses => "/busses",
            TransitKind::Trains => "/trains",
        }
    }

    /// Screen region this board renders into.
    pub const fn region(self) -> Region {
        match self {
            TransitKind::Buses => Region::Buses,
            TransitKind::Trains => Region::Trains,
        }
    }

    /// Short name for logs.
    pub const fn name(self) -> &'static str {
        match self {
            TransitKind::Buses => "buses",
            TransitKind::Trains => "trains",
        }
    }
}

/// Data gateway trait.
///
/// Returned futures are `Send` so each module can run on its own task.
pub trait Gateway: Send + Sync + 'static {
    /// Fetch the authoritative time.
    fn fetch_time(&self) -> impl Future<Output = Result<TimeReport, GatewayError>> + Send;

    /// Fetch current weather and the hourly forecast.
    fn fetch_weather(&self) -> impl Future<Output = Result<WeatherReport, GatewayError>> + Send;

    /// Fetch upcoming departures for one board.
    fn fetch_transit(
        &self,
        kind: TransitKind,
    ) -> impl Future<Output = Result<TransitReport, GatewayError>> + Send;

    /// Fetch the lighting zones and their state.
    fn fetch_zones(&self) -> impl Future<Output = Result<ZoneListing, GatewayError>> + Send;

    /// Switch a lighting zone. Only success or failure is meaningful.
    fn switch_zone(
        &self,
        command: SwitchCommand,
    ) -> impl Future<Output = Result<(), GatewayError>> + Send;
}

/// Gateway errors
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request never produced a response (connect, DNS, reset, ...).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The gateway answered with a non-success status.
    #[error("gateway returned status {status}")]
    Status {
        /// HTTP status code
        status: u16,
    },

    /// The body did not match the contract.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A command was refused.
    #[error("command rejected: {reason}")]
    Rejected {
        /// Human-readable reason
        reason: String,
    },
}

impl GatewayError {
    /// Transport failure from any error type.
    pub fn transport(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Transport(err.into())
    }

    /// `true` for contract violations, which are programming faults on the
    /// gateway side rather than transient conditions.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::Decode(_))
    }
}
