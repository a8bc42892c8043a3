//! Clock correction tests — run with `cargo test -p dashboard --test time_sync`
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::arithmetic_side_effects)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use dashboard::{ClockOffset, OffsetProvider, TimeSync};
use platform::mocks::{ManualClock, MockGateway};
use platform::{GatewayError, TimeReport};

fn report(utc: i64, zone_offset: i32) -> TimeReport {
    TimeReport {
        utc,
        zone_name: "Europe/Berlin".into(),
        zone_offset,
    }
}

fn counting(sync: &TimeSync<MockGateway>) -> Arc<AtomicUsize> {
    let fired = Arc::new(AtomicUsize::new(0));
    let sink = Arc::clone(&fired);
    let _subscription = sync.subscribe(move |_| {
        sink.fetch_add(1, Ordering::SeqCst);
    });
    fired
}

#[tokio::test]
async fn corrected_now_from_wire_report() {
    let local_at_capture = 1_699_999_000_000;
    let clock = Arc::new(ManualClock::new(local_at_capture));
    let gateway = Arc::new(MockGateway::new());
    let wire: TimeReport =
        serde_json::from_str(r#"{"utc":"1700000000000","zoneName":"Europe/Berlin","zoneOffset":120}"#).unwrap();
    gateway.push_time(Ok(wire));

    let sync = TimeSync::new(gateway, Arc::clone(&clock));
    assert!(sync.sync().await);

    let expected = local_at_capture + (1_700_000_000_000 - local_at_capture) + 120 * 60_000;
    assert_eq!(sync.corrected_now_ms(), expected);
    assert_eq!(sync.timezone_offset_ms(), 7_200_000);

    // the correction follows the local clock afterwards
    clock.advance(1_000);
    assert_eq!(sync.corrected_now_ms(), expected + 1_000);
}

#[tokio::test]
async fn listeners_fire_only_on_change() {
    let clock = Arc::new(ManualClock::new(1_000));
    let gateway = Arc::new(MockGateway::new());
    let sync = TimeSync::new(Arc::clone(&gateway), Arc::clone(&clock));
    let fired = counting(&sync);

    gateway.push_time(Ok(report(5_000, 60)));
    assert!(sync.sync().await);
    assert_eq!(fired.load(Ordering::SeqCst), 1);

    // same report, same local clock: nothing changed
    gateway.push_time(Ok(report(5_000, 60)));
    assert!(!sync.sync().await);
    assert_eq!(fired.load(Ordering::SeqCst), 1);

    // local clock drifted: clock offset changes
    clock.advance(250);
    gateway.push_time(Ok(report(5_000, 60)));
    assert!(sync.sync().await);
    assert_eq!(fired.load(Ordering::SeqCst), 2);

    // zone changed (DST)
    gateway.push_time(Ok(report(5_000, 120)));
    assert!(sync.sync().await);
    assert_eq!(fired.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn listeners_receive_the_new_offset() {
    let gateway = Arc::new(MockGateway::new());
    let sync = TimeSync::new(Arc::clone(&gateway), ManualClock::new(0));
    let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let _subscription = sync.subscribe(move |offset| sink.lock().unwrap().push(offset));

    gateway.push_time(Ok(report(3_000, -60)));
    sync.sync().await;
    assert_eq!(
        *seen.lock().unwrap(),
        vec![ClockOffset {
            timezone_offset_ms: -3_600_000,
            clock_offset_ms: 3_000,
        }]
    );
}

#[tokio::test]
async fn failure_keeps_previous_offset() {
    let gateway = Arc::new(MockGateway::new());
    let sync = TimeSync::new(Arc::clone(&gateway), ManualClock::new(0));
    gateway.push_time(Ok(report(10_000, 60)));
    sync.sync().await;
    let learned = sync.offset();
    let fired = counting(&sync);

    gateway.push_time(Err(GatewayError::Status { status: 503 }));
    assert!(!sync.sync().await);
    // empty queue: transport failure
    assert!(!sync.sync().await);

    assert_eq!(sync.offset(), learned);
    assert_eq!(fired.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn malformed_report_is_a_failed_fetch() {
    let gateway = Arc::new(MockGateway::new());
    let sync = TimeSync::new(Arc::clone(&gateway), ManualClock::new(0));
    let decode = serde_json::from_str::<TimeReport>(r#"{"utc":"soon"}"#).unwrap_err();
    gateway.push_time(Err(GatewayError::from(decode)));
    assert!(!sync.sync().await);
    assert_eq!(sync.offset(), ClockOffset::default());
}

#[tokio::test]
async fn unsubscribed_listener_is_not_called() {
    let gateway = Arc::new(MockGateway::new());
    let sync = TimeSync::new(Arc::clone(&gateway), ManualClock::new(0));
    let fired = Arc::new(AtomicUsize::new(0));
    let sink = Arc::clone(&fired);
    let subscription = sync.subscribe(move |_| {
        sink.fetch_add(1, Ordering::SeqCst);
    });
    assert_eq!(sync.listener_count(), 1);
    assert!(sync.unsubscribe(subscription));

    gateway.push_time(Ok(report(1, 1)));
    assert!(sync.sync().await);
    assert_eq!(fired.load(Ordering::SeqCst), 0);
}
