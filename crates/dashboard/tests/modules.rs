//! Display module tests — run with `cargo test -p dashboard --test modules`
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::arithmetic_side_effects,
    clippy::cast_precision_loss
)]

use std::sync::Arc;
use std::time::Duration;

use dashboard::modules::{Blackout, ClockModule, TransitModule, WeatherModule};
use dashboard::{spawn_periodic, FirstTick, TimeSync};
use platform::config::{BLACKOUT_HOLD, BLACKOUT_INTERVAL};
use platform::mocks::{ManualClock, MockGateway, MockSurface};
use platform::{
    CurrentConditions, Departure, GatewayError, HourlyForecast, HourlyPoint, Region, TimeReport,
    TransitKind, TransitReport, WeatherReport,
};
use ui::Locale;

// 2023-11-14T22:13:20Z, a Tuesday
const T0: i64 = 1_700_000_000_000;

async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}

fn weather() -> WeatherReport {
    WeatherReport {
        currently: CurrentConditions {
            temperature: 7.4,
            summary: "Light rain".into(),
        },
        hourly: HourlyForecast {
            summary: "Rain until evening.".into(),
            data: (0..4)
                .map(|i| HourlyPoint {
                    // 22:00 UTC + i hours
                    time: 1_699_999_200 + i * 3600,
                    temperature: 7.0 - i as f64,
                    summary: "Rain".into(),
                })
                .collect(),
        },
    }
}

// ── Clock ────────────────────────────────────────────────────────────────────

#[test]
fn clock_writes_only_what_changed() {
    let clock = Arc::new(ManualClock::new(T0));
    let sync = Arc::new(TimeSync::new(Arc::new(MockGateway::new()), Arc::clone(&clock)));
    let surface = Arc::new(MockSurface::new());
    let face = ClockModule::new(sync, Arc::clone(&surface), Locale::default());

    assert_eq!(face.render(), 2);
    assert_eq!(surface.content(Region::Time).as_deref(), Some("22:13"));
    assert_eq!(surface.content(Region::Date).as_deref(), Some("Tuesday\n14. November"));

    // unchanged corrected time: no writes at all
    assert_eq!(face.render(), 0);

    // seconds are not shown
    clock.advance(30_000);
    assert_eq!(face.render(), 0);

    // minute rollover rewrites the time only
    clock.advance(10_000);
    assert_eq!(face.render(), 1);
    assert_eq!(surface.content(Region::Time).as_deref(), Some("22:14"));
    assert_eq!(surface.write_count(Region::Date), 1);
}

#[test]
fn clock_follows_the_correction() {
    let sync = Arc::new(TimeSync::new(Arc::new(MockGateway::new()), ManualClock::new(T0)));
    let surface = Arc::new(MockSurface::new());
    let face = ClockModule::new(Arc::clone(&sync), Arc::clone(&surface), Locale::default());
    face.render();

    // authoritative time is 10 minutes ahead, display zone is UTC+2
    sync.apply(&TimeReport {
        utc: T0 + 600_000,
        zone_name: "Europe/Berlin".into(),
        zone_offset: 120,
    });
    assert_eq!(face.render(), 2);
    assert_eq!(surface.content(Region::Time).as_deref(), Some("00:23"));
    assert_eq!(surface.content(Region::Date).as_deref(), Some("Wednesday\n15. November"));
}

#[test]
fn clock_retries_failed_writes() {
    let sync = Arc::new(TimeSync::new(Arc::new(MockGateway::new()), ManualClock::new(T0)));
    let surface = Arc::new(MockSurface::new());
    let face = ClockModule::new(sync, Arc::clone(&surface), Locale::default());

    surface.fail_writes(true);
    assert_eq!(face.render(), 0);
    surface.fail_writes(false);
    assert_eq!(face.render(), 2);
}

// ── Weather ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn weather_renders_once_per_change() {
    let gateway = Arc::new(MockGateway::new());
    let sync = Arc::new(TimeSync::new(Arc::clone(&gateway), ManualClock::new(T0)));
    let surface = Arc::new(MockSurface::new());
    let module = WeatherModule::new(Arc::clone(&gateway), sync, Arc::clone(&surface), 14);

    gateway.push_weather(Ok(weather()));
    assert!(module.refresh().await);
    let block = surface.content(Region::Weather).unwrap();
    assert!(block.starts_with("7° C  Light rain\nRain until evening.\n----\n23:00"));

    gateway.push_weather(Ok(weather()));
    assert!(!module.refresh().await);
    assert_eq!(surface.write_count(Region::Weather), 1);
}

#[tokio::test]
async fn weather_failure_keeps_previous_block() {
    let gateway = Arc::new(MockGateway::new());
    let sync = Arc::new(TimeSync::new(Arc::clone(&gateway), ManualClock::new(T0)));
    let surface = Arc::new(MockSurface::new());
    let module = WeatherModule::new(Arc::clone(&gateway), sync, Arc::clone(&surface), 14);

    gateway.push_weather(Ok(weather()));
    module.refresh().await;
    let before = surface.content(Region::Weather);

    gateway.push_weather(Err(GatewayError::Status { status: 500 }));
    assert!(!module.refresh().await);
    assert!(!module.refresh().await);
    assert_eq!(surface.content(Region::Weather), before);
    assert_eq!(surface.write_count(Region::Weather), 1);
}

#[tokio::test]
async fn weather_rerenders_when_timezone_changes() {
    let gateway = Arc::new(MockGateway::new());
    let sync = Arc::new(TimeSync::new(Arc::clone(&gateway), ManualClock::new(T0)));
    let surface = Arc::new(MockSurface::new());
    let module = Arc::new(WeatherModule::new(
        Arc::clone(&gateway),
        Arc::clone(&sync),
        Arc::clone(&surface),
        14,
    ));
    let _subscription = module.attach(&sync);

    gateway.push_weather(Ok(weather()));
    module.refresh().await;
    assert_eq!(surface.write_count(Region::Weather), 1);

    // a zone change must relabel the forecast without a new fetch
    gateway.push_time(Ok(TimeReport {
        utc: T0,
        zone_name: "Europe/Berlin".into(),
        zone_offset: 60,
    }));
    assert!(sync.sync().await);
    assert_eq!(surface.write_count(Region::Weather), 2);
    assert!(surface.content(Region::Weather).unwrap().contains("\n0:00"));
    assert_eq!(gateway.calls("weather"), 1);
}

#[tokio::test]
async fn clock_only_change_does_not_redraw_weather() {
    let gateway = Arc::new(MockGateway::new());
    let clock = Arc::new(ManualClock::new(T0));
    let sync = Arc::new(TimeSync::new(Arc::clone(&gateway), Arc::clone(&clock)));
    let surface = Arc::new(MockSurface::new());
    let module = Arc::new(WeatherModule::new(
        Arc::clone(&gateway),
        Arc::clone(&sync),
        Arc::clone(&surface),
        14,
    ));
    let _subscription = module.attach(&sync);
    gateway.push_weather(Ok(weather()));
    module.refresh().await;

    // notified, re-rendered, but the block is identical
    gateway.push_time(Ok(TimeReport {
        utc: T0 + 5_000,
        zone_name: "UTC".into(),
        zone_offset: 0,
    }));
    assert!(sync.sync().await);
    assert_eq!(surface.write_count(Region::Weather), 1);
}

#[tokio::test]
async fn dropped_weather_module_ignores_notifications() {
    let gateway = Arc::new(MockGateway::new());
    let sync = Arc::new(TimeSync::new(Arc::clone(&gateway), ManualClock::new(T0)));
    let surface = Arc::new(MockSurface::new());
    let module = Arc::new(WeatherModule::new(
        Arc::clone(&gateway),
        Arc::clone(&sync),
        Arc::clone(&surface),
        14,
    ));
    let subscription = module.attach(&sync);
    drop(module);

    gateway.push_time(Ok(TimeReport {
        utc: T0,
        zone_name: "Europe/Berlin".into(),
        zone_offset: 60,
    }));
    assert!(sync.sync().await);
    assert_eq!(surface.total_writes(), 0);
    assert!(sync.unsubscribe(subscription));
}

// ── Transit ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn transit_board_renders_cleaned_rows() {
    let gateway = Arc::new(MockGateway::new());
    let surface = Arc::new(MockSurface::new());
    let buses = TransitModule::new(Arc::clone(&gateway), Arc::clone(&surface), TransitKind::Buses, "Buses", 5);

    gateway.push_transit(
        TransitKind::Buses,
        Ok(TransitReport::new(vec![
            Departure::new("5", "Burgwedel (Gleis 3)", "12:01").delayed_by(90.0),
            Departure::new("22", "Eppendorf, via Lokstedt", "12:04"),
        ])),
    );
    assert!(buses.refresh().await);
    assert_eq!(
        surface.content(Region::Buses).as_deref(),
        Some("Buses\n5  Burgwedel  12:01 (+2)\n22  Eppendorf  12:04")
    );
}

#[tokio::test]
async fn transit_boards_are_independent() {
    let gateway = Arc::new(MockGateway::new());
    let surface = Arc::new(MockSurface::new());
    let buses = TransitModule::new(Arc::clone(&gateway), Arc::clone(&surface), TransitKind::Buses, "Buses", 5);
    let trains = TransitModule::new(Arc::clone(&gateway), Arc::clone(&surface), TransitKind::Trains, "Trains", 5);

    gateway.push_transit(TransitKind::Buses, Ok(TransitReport::new(vec![Departure::new("5", "Nord", "12:01")])));
    assert!(buses.refresh().await);
    // trains source is down
    assert!(!trains.refresh().await);

    assert_eq!(surface.content(Region::Trains), None);
    assert_eq!(surface.write_count(Region::Buses), 1);
    assert_eq!(gateway.calls("buses"), 1);
    assert_eq!(gateway.calls("trains"), 1);

    // buses failing later keeps the board
    assert!(!buses.refresh().await);
    assert_eq!(surface.content(Region::Buses).as_deref(), Some("Buses\n5  Nord  12:01"));
}

// ── Blackout ─────────────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn blackout_holds_for_half_a_second() {
    let surface = Arc::new(MockSurface::new());
    let blackout = Arc::new(Blackout::new(Arc::clone(&surface), BLACKOUT_HOLD));
    let running = tokio::spawn({
        let blackout = Arc::clone(&blackout);
        async move { blackout.fire().await }
    });

    tokio::time::sleep(Duration::from_millis(499)).await;
    assert_eq!(surface.blackouts(), vec![true]);
    tokio::time::sleep(Duration::from_millis(2)).await;
    assert!(running.await.unwrap());
    assert_eq!(surface.blackouts(), vec![true, false]);
}

#[tokio::test(start_paused = true)]
async fn refused_restore_is_retried_after_another_hold() {
    let surface = Arc::new(MockSurface::new());
    let blackout = Arc::new(Blackout::new(Arc::clone(&surface), BLACKOUT_HOLD));
    let running = tokio::spawn({
        let blackout = Arc::clone(&blackout);
        async move { blackout.fire().await }
    });

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(surface.blackouts(), vec![true]);
    // panel busy when the first restore comes due
    surface.fail_writes(true);
    tokio::time::sleep(Duration::from_millis(450)).await;
    assert_eq!(surface.blackouts(), vec![true]);
    assert!(!running.is_finished());

    surface.fail_writes(false);
    tokio::time::sleep(BLACKOUT_HOLD).await;
    assert!(running.await.unwrap());
    assert_eq!(surface.blackouts(), vec![true, false]);
}

#[tokio::test]
async fn refused_blackout_is_skipped() {
    let surface = Arc::new(MockSurface::new());
    surface.fail_writes(true);
    let blackout = Blackout::new(Arc::clone(&surface), BLACKOUT_HOLD);
    assert!(!blackout.fire().await);
    assert!(surface.blackouts().is_empty());
}

#[tokio::test(start_paused = true)]
async fn scheduled_blackout_waits_one_period() {
    let surface = Arc::new(MockSurface::new());
    let _task = spawn_periodic(
        "blackout",
        BLACKOUT_INTERVAL,
        FirstTick::AfterPeriod,
        Arc::new(Blackout::new(Arc::clone(&surface), BLACKOUT_HOLD)),
    );
    settle().await;
    assert!(surface.blackouts().is_empty());

    tokio::time::sleep(BLACKOUT_INTERVAL + Duration::from_secs(1)).await;
    settle().await;
    assert_eq!(surface.blackouts(), vec![true, false]);
}
