//! Presentation layer — everything between a decoded gateway response and a
//! region write.
//!
//! Nothing in this crate performs I/O or owns a timer. Modules in the
//! dashboard crate fetch, then hand the data to these functions, then write
//! the result through a [`RenderedContent`] guard so unchanged content never
//! reaches the panel.

#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod clock_face;
pub mod departures;
mod format;
pub mod region;
pub mod weather;
pub mod zones;

pub use clock_face::{format_date, format_time, Locale};
pub use departures::{clean_direction, delay_suffix, render_departures};
pub use region::RenderedContent;
pub use weather::render_weather;
pub use zones::{PendingCommand, Reconciliation, Resolution, ZoneBoard, ZoneItem};
