//! Platform seams for the ambient display client
//!
//! This crate provides trait-based abstractions for everything the display
//! core talks to, enabling development and testing without a panel, a network,
//! or a trustworthy clock.
//!
//! # Architecture Layers
//!
//! ```text
//! Application Layer (dashboard crate: scheduler, modules, binary)
//!         ↓
//! Presentation Layer (ui crate: formatting, idempotence, zone board)
//!         ↓
//! Platform seams (this crate - traits + wire contracts)
//!         ↓
//! Transport / panel (HTTP gateway, console or e-paper surface)
//! ```
//!
//! # Seams
//!
//! - [`Surface`] - region-addressed display writes and blackout
//! - [`Gateway`] - the data gateway contracts (time, weather, transit, zones)
//! - [`LocalClock`] - the device's own, unreliable wall clock
//! - [`InputDevice`] - user activations of lighting zones
//!
//! # Features
//!
//! - `mocks`: in-memory implementations of every seam for tests
//!
//! # Example
//!
//! ```no_run
//! use platform::{Region, Surface};
//!
//! fn show<S: Surface>(surface: &S) {
//!     surface.write(Region::Time, "12:00").ok();
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::print_stdout)] // prefer tracing over println! in lib code
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod clock;
pub mod config;
pub mod contract;
pub mod display;
pub mod gateway;
pub mod input;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;

// Re-export main high-level traits
pub use clock::{LocalClock, SystemClock};
pub use display::{DisplayError, Region, Surface};
pub use gateway::{Gateway, GatewayError, TransitKind};
pub use input::{InputDevice, InputEvent};

// Re-export wire contracts
pub use contract::{
    CurrentConditions, DelayField, Departure, HourlyForecast, HourlyPoint, SwitchCommand,
    TimeReport, TransitReport, WeatherReport, ZoneId, ZoneListing, ZoneReport, ZoneState,
};
