//! Ambient Display runtime
//!
//! Always-on dashboard for a repurposed e-paper reader: time, weather, transit
//! departures and lighting controls, each polled on its own cadence and
//! redrawn only when its content changes.
//!
//! # Architecture
//!
//! ```text
//! main.rs (CLI, logging, runtime)
//!         ↓
//! Dashboard (wiring, task ownership)
//!         ↓
//! TimeSync + display modules + zone panel (one periodic task each)
//!         ↓
//! ui (pure formatting and reconciliation)
//!         ↓
//! platform seams (Gateway, Surface, LocalClock, InputDevice)
//! ```
//!
//! Everything runs on a single-threaded tokio runtime. Modules share no state
//! except the clock correction (read through [`OffsetProvider`]) and the zone
//! board, which the poll and user activations both write.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Critical correctness: deny these
#![deny(clippy::await_holding_lock)] // holding a blocking Mutex across .await is a bug
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
// Logging discipline (allow println in tests via clippy.toml)
#![warn(clippy::print_stdout)] // the console surface writes through io::Write
#![warn(clippy::dbg_macro)]
// Intentional allows for this codebase:
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::unused_async)]

pub mod app;
pub mod config;
pub mod console;
pub mod http;
pub mod input;
pub mod modules;
pub mod scheduler;
pub mod time_sync;

pub use app::Dashboard;
pub use config::{ConfigError, Settings};
pub use console::ConsoleSurface;
pub use http::HttpGateway;
pub use input::StdinInput;
pub use scheduler::{spawn_periodic, FirstTick, TaskHandle, Tick};
pub use time_sync::{ClockOffset, OffsetProvider, Subscription, TimeSync};
