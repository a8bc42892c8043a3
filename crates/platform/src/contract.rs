//! Data gateway wire contracts
//!
//! The gateway adapts vendor APIs (weather, transit, lighting bridge) into the
//! small JSON shapes below. Field names follow the wire format; the Rust side
//! uses snake_case with `serde(rename)`.

use core::fmt;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

use crate::config::MS_PER_MINUTE;

// ── Time ─────────────────────────────────────────────────────────────────────

/// Response of the time source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TimeReport {
    /// Authoritative UTC time in milliseconds since the epoch.
    ///
    /// Sent as a decimal string; a bare JSON integer is accepted too.
    #[serde(deserialize_with = "epoch_millis")]
    pub utc: i64,
    /// IANA name of the configured display time zone.
    #[serde(rename = "zoneName")]
    pub zone_name: String,
    /// Offset of the display time zone from UTC, in minutes.
    #[serde(rename = "zoneOffset")]
    pub zone_offset: i32,
}

impl TimeReport {
    /// The zone offset converted to milliseconds.
    pub fn zone_offset_ms(&self) -> i64 {
        i64::from(self.zone_offset).saturating_mul(MS_PER_MINUTE)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrString {
    Int(i64),
    Text(String),
}

fn epoch_millis<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match IntOrString::deserialize(deserializer)? {
        IntOrString::Int(ms) => Ok(ms),
        IntOrString::Text(text) => text.trim().parse().map_err(de::Error::custom),
    }
}

// ── Weather ──────────────────────────────────────────────────────────────────

/// Response of the weather source.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WeatherReport {
    /// Conditions right now.
    pub currently: CurrentConditions,
    /// Hour-by-hour forecast.
    pub hourly: HourlyForecast,
}

/// Current temperature and a one-line description.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CurrentConditions {
    /// Degrees Celsius.
    pub temperature: f64,
    /// Short human-readable description.
    pub summary: String,
}

/// Forecast for the coming hours.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HourlyForecast {
    /// Broad description of the coming hours.
    pub summary: String,
    /// One entry per hour; entry 0 is the current hour.
    #[serde(default)]
    pub data: Vec<HourlyPoint>,
}

/// A single forecast hour.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HourlyPoint {
    /// Start of the hour, seconds since the epoch (UTC).
    pub time: i64,
    /// Degrees Celsius.
    pub temperature: f64,
    /// Short description.
    pub summary: String,
}

// ── Transit ──────────────────────────────────────────────────────────────────

/// Response of a transit source (buses or trains).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TransitReport {
    /// Envelope.
    pub data: TransitData,
}

/// Envelope of a transit response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TransitData {
    /// Payload attributes.
    pub attributes: TransitAttributes,
}

/// Payload attributes of a transit response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TransitAttributes {
    /// Upcoming departures, soonest first.
    #[serde(default)]
    pub departures: Vec<Departure>,
}

impl TransitReport {
    /// Wrap a list of departures in the response envelope.
    pub fn new(departures: Vec<Departure>) -> Self {
        Self {
            data: TransitData {
                attributes: TransitAttributes { departures },
            },
        }
    }

    /// Upcoming departures, soonest first.
    pub fn departures(&self) -> &[Departure] {
        &self.data.attributes.departures
    }
}

/// One departure on a board.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Departure {
    /// Line name, e.g. `"S1"`.
    pub line: String,
    /// Raw direction text as published by the operator.
    pub direction: String,
    /// Scheduled time, `"HH:MM"`.
    pub time: String,
    /// Whether the operator flags this departure as delayed.
    #[serde(rename = "hasDelay", default)]
    pub has_delay: bool,
    /// Size of the delay, see [`DelayField`].
    #[serde(default)]
    pub delay: Option<DelayField>,
}

impl Departure {
    /// A departure with no delay information.
    pub fn new(line: impl Into<String>, direction: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            line: line.into(),
            direction: direction.into(),
            time: time.into(),
            has_delay: false,
            delay: None,
        }
    }

    /// Mark the departure delayed by `seconds`.
    #[must_use]
    pub fn delayed_by(mut self, seconds: f64) -> Self {
        self.has_delay = true;
        self.delay = Some(DelayField::Seconds(seconds));
        self
    }
}

/// Delay as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DelayField {
    /// Delay in seconds.
    Seconds(f64),
    /// Either a numeric string (seconds) or an annotation the gateway
    /// already formatted, such as `"(+2)"`.
    Text(String),
}

// ── Lighting zones ───────────────────────────────────────────────────────────

/// Identifier of a lighting zone, as assigned by the lighting bridge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneId(String);

impl ZoneId {
    /// Wrap a bridge identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ZoneId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ZoneId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A zone as reported by the zones source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ZoneReport {
    /// Human-readable zone name, used as the button label.
    pub name: String,
    /// Aggregate light state.
    pub state: ZoneState,
}

impl ZoneReport {
    /// Build a report from a name and on/off state.
    pub fn new(name: impl Into<String>, on: bool) -> Self {
        Self {
            name: name.into(),
            state: ZoneState { all_on: on },
        }
    }
}

/// Aggregate light state of a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct ZoneState {
    /// `true` when every light in the zone is on.
    #[serde(default)]
    pub all_on: bool,
}

/// The zones source response: zone id → report, in payload order.
///
/// The wire format is a JSON object; entries keep the order in which the
/// object's keys appear in the payload. A repeated key replaces the earlier
/// entry in place.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ZoneListing {
    zones: Vec<(ZoneId, ZoneReport)>,
}

impl ZoneListing {
    /// An empty listing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, used by tests and mocks.
    #[must_use]
    pub fn with(mut self, id: impl Into<ZoneId>, name: impl Into<String>, on: bool) -> Self {
        self.insert(id.into(), ZoneReport::new(name, on));
        self
    }

    /// Insert or replace a zone, keeping first-seen order.
    pub fn insert(&mut self, id: ZoneId, report: ZoneReport) {
        match self.zones.iter_mut().find(|(existing, _)| *existing == id) {
            Some((_, slot)) => *slot = report,
            None => self.zones.push((id, report)),
        }
    }

    /// Number of zones.
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// `true` when the bridge reported no zones.
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Look up a zone by id.
    pub fn get(&self, id: &ZoneId) -> Option<&ZoneReport> {
        self.zones.iter().find(|(zone, _)| zone == id).map(|(_, report)| report)
    }

    /// Zones in payload order.
    pub fn iter(&self) -> impl Iterator<Item = (&ZoneId, &ZoneReport)> {
        self.zones.iter().map(|(id, report)| (id, report))
    }
}

impl FromIterator<(ZoneId, ZoneReport)> for ZoneListing {
    fn from_iter<T: IntoIterator<Item = (ZoneId, ZoneReport)>>(iter: T) -> Self {
        let mut listing = ZoneListing::new();
        for (id, report) in iter {
            listing.insert(id, report);
        }
        listing
    }
}

impl<'de> Deserialize<'de> for ZoneListing {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ListingVisitor;

        impl<'de> Visitor<'de> for ListingVisitor {
            type Value = ZoneListing;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of zone id to zone report")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut listing = ZoneListing::new();
                while let Some((id, report)) = map.next_entry::<ZoneId, ZoneReport>()? {
                    listing.insert(id, report);
                }
                Ok(listing)
            }
        }

        deserializer.deserialize_map(ListingVisitor)
    }
}

/// Command sent to the switch sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchCommand {
    /// Zone to switch.
    #[serde(rename = "roomId")]
    pub room_id: ZoneId,
    /// Desired state.
    pub on: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_report_accepts_string_utc() {
        let report: TimeReport = serde_json::from_str(
            r#"{"utc":"1700000000000","zoneName":"Europe/Berlin","zoneOffset":120}"#,
        )
        .unwrap();
        assert_eq!(report.utc, 1_700_000_000_000);
        assert_eq!(report.zone_name, "Europe/Berlin");
        assert_eq!(report.zone_offset_ms(), 7_200_000);
    }

    #[test]
    fn time_report_accepts_integer_utc() {
        let report: TimeReport =
            serde_json::from_str(r#"{"utc":1700000000000,"zoneName":"UTC","zoneOffset":0}"#)
                .unwrap();
        assert_eq!(report.utc, 1_700_000_000_000);
        assert_eq!(report.zone_offset_ms(), 0);
    }

    #[test]
    fn time_report_rejects_non_numeric_utc() {
        let result: Result<TimeReport, _> =
            serde_json::from_str(r#"{"utc":"soon","zoneName":"UTC","zoneOffset":0}"#);
        assert!(result.is_err());
    }

    #[test]
    fn negative_zone_offset() {
        let report: TimeReport = serde_json::from_str(
            r#"{"utc":"0","zoneName":"America/New_York","zoneOffset":-300}"#,
        )
        .unwrap();
        assert_eq!(report.zone_offset_ms(), -18_000_000);
    }

    #[test]
    fn zone_listing_preserves_payload_order() {
        let listing: ZoneListing = serde_json::from_str(
            r#"{
                "7": {"name": "Kitchen", "state": {"all_on": true, "any_on": true}},
                "2": {"name": "Hall", "state": {"all_on": false}},
                "11": {"name": "Office", "state": {"all_on": false}, "type": "Room"}
            }"#,
        )
        .unwrap();
        let ids: Vec<&str> = listing.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, ["7", "2", "11"]);
        assert!(listing.get(&ZoneId::from("7")).unwrap().state.all_on);
    }

    #[test]
    fn zone_listing_repeated_key_replaces_in_place() {
        let listing = ZoneListing::new()
            .with("1", "A", false)
            .with("2", "B", false)
            .with("1", "A2", true);
        assert_eq!(listing.len(), 2);
        let (first_id, first) = listing.iter().next().unwrap();
        assert_eq!(first_id.as_str(), "1");
        assert_eq!(first.name, "A2");
    }

    #[test]
    fn departure_delay_forms() {
        let report: TransitReport = serde_json::from_str(
            r#"{"data":{"attributes":{"departures":[
                {"line":"5","direction":"Nedderfeld","time":"12:01","hasDelay":true,"delay":90},
                {"line":"S1","direction":"Wedel","time":"12:03","hasDelay":true,"delay":"(+2)"},
                {"line":"U3","direction":"Barmbek","time":"12:04","hasDelay":false,"delay":""},
                {"line":"20","direction":"Altona","time":"12:05"}
            ]}}}"#,
        )
        .unwrap();
        let departures = report.departures();
        assert_eq!(departures.len(), 4);
        assert_eq!(departures[0].delay, Some(DelayField::Seconds(90.0)));
        assert_eq!(departures[1].delay, Some(DelayField::Text("(+2)".into())));
        assert!(!departures[3].has_delay);
        assert_eq!(departures[3].delay, None);
    }

    #[test]
    fn switch_command_wire_names() {
        let json = serde_json::to_string(&SwitchCommand {
            room_id: ZoneId::from("3"),
            on: true,
        })
        .unwrap();
        assert_eq!(json, r#"{"roomId":"3","on":true}"#);
    }
}
