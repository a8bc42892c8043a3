//! Mock implementations for testing
//!
//! This module provides mock implementations of all platform traits
//! for use in unit and integration tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::{mpsc, oneshot};

use crate::*;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ── Surface ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct SurfaceLog {
    writes: Vec<(Region, String)>,
    current: HashMap<Region, String>,
    blackouts: Vec<bool>,
}

/// Mock display that records every physical write
#[derive(Default)]
pub struct MockSurface {
    log: Mutex<SurfaceLog>,
    failing: AtomicBool,
}

impl MockSurface {
    /// Create new mock surface
    pub fn new() -> Self {
        Self::default()
    }

    /// Every successful write, in order
    pub fn writes(&self) -> Vec<(Region, String)> {
        lock(&self.log).writes.clone()
    }

    /// Number of successful writes to `region`
    pub fn write_count(&self, region: Region) -> usize {
        lock(&self.log).writes.iter().filter(|(r, _)| *r == region).count()
    }

    /// Number of successful writes to any region
    pub fn total_writes(&self) -> usize {
        lock(&self.log).writes.len()
    }

    /// What `region` currently shows
    pub fn content(&self, region: Region) -> Option<String> {
        lock(&self.log).current.get(&region).cloned()
    }

    /// Every blackout transition, in order (`true` = went black)
    pub fn blackouts(&self) -> Vec<bool> {
        lock(&self.log).blackouts.clone()
    }

    /// Make subsequent writes fail with [`DisplayError::Busy`]
    pub fn fail_writes(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl Surface for MockSurface {
    fn write(&self, region: Region, content: &str) -> Result<(), DisplayError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DisplayError::Busy);
        }
        let mut log = lock(&self.log);
        log.writes.push((region, content.to_owned()));
        log.current.insert(region, content.to_owned());
        Ok(())
    }

    fn set_blackout(&self, active: bool) -> Result<(), DisplayError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DisplayError::Busy);
        }
        lock(&self.log).blackouts.push(active);
        Ok(())
    }
}

// ── Clock ────────────────────────────────────────────────────────────────────

/// Local clock that only moves when told to
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: AtomicI64,
}

impl ManualClock {
    /// Create a clock reading `now_ms`
    pub fn new(now_ms: i64) -> Self {
        Self {
            now_ms: AtomicI64::new(now_ms),
        }
    }

    /// Jump to `now_ms`
    pub fn set(&self, now_ms: i64) {
        self.now_ms.store(now_ms, Ordering::SeqCst);
    }

    /// Move forward by `delta_ms`
    pub fn advance(&self, delta_ms: i64) {
        self.now_ms.fetch_add(delta_ms, Ordering::SeqCst);
    }
}

impl LocalClock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now_ms.load(Ordering::SeqCst)
    }
}

// ── Gateway ──────────────────────────────────────────────────────────────────

/// Scripted reply to a switch command
pub enum SwitchReply {
    /// Succeed immediately
    Accept,
    /// Fail immediately
    Reject,
    /// Wait for the test to decide: `true` succeeds, `false` (or dropping the
    /// sender) fails
    Gated(oneshot::Receiver<bool>),
}

impl SwitchReply {
    /// A gated reply plus the sender that resolves it
    pub fn gated() -> (oneshot::Sender<bool>, Self) {
        let (tx, rx) = oneshot::channel();
        (tx, SwitchReply::Gated(rx))
    }
}

type Script<T> = Mutex<VecDeque<Result<T, GatewayError>>>;

/// Mock gateway with per-endpoint response queues
///
/// An endpoint whose queue is empty fails with a transport error, which is
/// exactly how the client sees a gateway that is down. Switch commands
/// succeed unless a [`SwitchReply`] says otherwise.
#[derive(Default)]
pub struct MockGateway {
    time: Script<TimeReport>,
    weather: Script<WeatherReport>,
    buses: Script<TransitReport>,
    trains: Script<TransitReport>,
    zones: Script<ZoneListing>,
    switch: Mutex<VecDeque<SwitchReply>>,
    commands: Mutex<Vec<SwitchCommand>>,
    calls: Mutex<HashMap<&'static str, usize>>,
}

impl MockGateway {
    /// Create a gateway with nothing scripted
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a time source response
    pub fn push_time(&self, response: Result<TimeReport, GatewayError>) {
        lock(&self.time).push_back(response);
    }

    /// Queue a weather source response
    pub fn push_weather(&self, response: Result<WeatherReport, GatewayError>) {
        lock(&self.weather).push_back(response);
    }

    /// Queue a transit source response for one board
    pub fn push_transit(&self, kind: TransitKind, response: Result<TransitReport, GatewayError>) {
        let queue = match kind {
            TransitKind::Buses => &self.buses,
            TransitKind::Trains => &self.trains,
        };
        lock(queue).push_back(response);
    }

    /// Queue a zones source response
    pub fn push_zones(&self, response: Result<ZoneListing, GatewayError>) {
        lock(&self.zones).push_back(response);
    }

    /// Queue the reply to the next switch command
    pub fn push_switch(&self, reply: SwitchReply) {
        lock(&self.switch).push_back(reply);
    }

    /// Every switch command received, in order
    pub fn commands(&self) -> Vec<SwitchCommand> {
        lock(&self.commands).clone()
    }

    /// How many times `endpoint` (`"time"`, `"weather"`, `"buses"`, `"trains"`,
    /// `"zones"`, `"switch"`) was called
    pub fn calls(&self, endpoint: &str) -> usize {
        lock(&self.calls).get(endpoint).copied().unwrap_or(0)
    }

    fn count(&self, endpoint: &'static str) {
        let mut calls = lock(&self.calls);
        let count = calls.entry(endpoint).or_insert(0);
        *count = count.saturating_add(1);
    }

    fn next<T>(&self, endpoint: &'static str, script: &Script<T>) -> Result<T, GatewayError> {
        self.count(endpoint);
        let scripted = lock(script).pop_front();
        scripted.unwrap_or_else(|| {
            Err(GatewayError::transport(format!(
                "no scripted {endpoint} response"
            )))
        })
    }
}

impl Gateway for MockGateway {
    async fn fetch_time(&self) -> Result<TimeReport, GatewayError> {
        self.next("time", &self.time)
    }

    async fn fetch_weather(&self) -> Result<WeatherReport, GatewayError> {
        self.next("weather", &self.weather)
    }

    async fn fetch_transit(&self, kind: TransitKind) -> Result<TransitReport, GatewayError> {
        match kind {
            TransitKind::Buses => self.next("buses", &self.buses),
            TransitKind::Trains => self.next("trains", &self.trains),
        }
    }

    async fn fetch_zones(&self) -> Result<ZoneListing, GatewayError> {
        self.next("zones", &self.zones)
    }

    async fn switch_zone(&self, command: SwitchCommand) -> Result<(), GatewayError> {
        self.count("switch");
        lock(&self.commands).push(command);
        let reply = lock(&self.switch).pop_front();
        match reply {
            None | Some(SwitchReply::Accept) => Ok(()),
            Some(SwitchReply::Reject) => Err(GatewayError::Rejected {
                reason: "scripted rejection".into(),
            }),
            Some(SwitchReply::Gated(gate)) => match gate.await {
                Ok(true) => Ok(()),
                Ok(false) | Err(_) => Err(GatewayError::Rejected {
                    reason: "gate resolved to failure".into(),
                }),
            },
        }
    }
}

// ── Input ────────────────────────────────────────────────────────────────────

/// Mock input device fed through a channel
pub struct MockInput {
    events: mpsc::UnboundedReceiver<InputEvent>,
}

/// Sending half of [`MockInput`]
#[derive(Clone)]
pub struct MockInputHandle {
    events: mpsc::UnboundedSender<InputEvent>,
}

impl MockInput {
    /// Create a connected handle/device pair
    pub fn channel() -> (MockInputHandle, MockInput) {
        let (tx, rx) = mpsc::unbounded_channel();
        (MockInputHandle { events: tx }, MockInput { events: rx })
    }
}

impl MockInputHandle {
    /// Press the button for `zone`. Returns `false` if the device was dropped.
    pub fn activate(&self, zone: impl Into<ZoneId>) -> bool {
        self.events.send(InputEvent::Activate(zone.into())).is_ok()
    }
}

impl InputDevice for MockInput {
    async fn wait_for_event(&mut self) -> Option<InputEvent> {
        self.events.recv().await
    }
}
