//! Departure boards — direction cleaning, delay annotation, row layout.

use std::sync::LazyLock;

use platform::{DelayField, Departure};
use regex::Regex;

use crate::format::round_half_up;

/// A trailing parenthetical (` (Gleis 3)`) or a trailing comma clause
/// (`, via X`). The leftmost match wins.
static DIRECTION_SUFFIX: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r" \(.*\)$|, .*$").ok());

/// Strip operator noise from the end of a direction.
///
/// `"Hauptbahnhof (Gleis 3)"` and `"Hauptbahnhof, via X"` both become
/// `"Hauptbahnhof"`.
pub fn clean_direction(direction: &str) -> &str {
    match DIRECTION_SUFFIX.as_ref().and_then(|re| re.find(direction)) {
        Some(suffix) => direction.get(..suffix.start()).unwrap_or(direction),
        None => direction,
    }
}

/// Delay annotation shown after the departure time, e.g. `(+2)`.
///
/// Only present when the source flags the departure as delayed *and* gives a
/// non-zero delay. Numbers (and numeric strings) are seconds and are shown
/// as rounded minutes; any other text was already formatted by the gateway
/// and is shown as-is.
pub fn delay_suffix(departure: &Departure) -> Option<String> {
    if !departure.has_delay {
        return None;
    }
    match departure.delay.as_ref()? {
        DelayField::Seconds(seconds) => minutes_annotation(*seconds),
        DelayField::Text(text) => {
            let text = text.trim();
            if text.is_empty() {
                None
            } else if let Ok(seconds) = text.parse::<f64>() {
                minutes_annotation(seconds)
            } else {
                Some(text.to_owned())
            }
        }
    }
}

// Early departures (negative delay) are not annotated.
fn minutes_annotation(seconds: f64) -> Option<String> {
    if seconds <= 0.0 || !seconds.is_finite() {
        return None;
    }
    Some(format!("(+{})", round_half_up(seconds / 60.0)))
}

/// Render a board: caption line, then at most `rows` departures.
pub fn render_departures(caption: &str, departures: &[Departure], rows: usize) -> String {
    let mut board = String::from(caption);
    for departure in departures.iter().take(rows) {
        board.push('\n');
        board.push_str(&departure.line);
        board.push_str("  ");
        board.push_str(clean_direction(&departure.direction));
        board.push_str("  ");
        board.push_str(&departure.time);
        if let Some(delay) = delay_suffix(departure) {
            board.push(' ');
            board.push_str(&delay);
        }
    }
    board
}
