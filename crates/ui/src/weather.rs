//! Weather block — current conditions plus an hourly forecast strip.
//!
//! The block is always rendered as a whole. Hour labels depend on the
//! timezone offset, so the block must be re-rendered whenever that offset
//! changes even if the weather data did not.

use chrono::{DateTime, Timelike};
use platform::{HourlyPoint, WeatherReport};

use crate::format::round_half_up;

const COLUMN_GAP: &str = "  ";

/// Render the weather block.
///
/// `columns` counts hourly points starting at index 0; point 0 is the current
/// hour and is already covered by the "currently" line, so the strip shows
/// points `1..columns`. Points the source did not send are simply left out.
pub fn render_weather(report: &WeatherReport, timezone_offset_ms: i64, columns: usize) -> String {
    let mut block = format!(
        "{}° C  {}\n{}\n----",
        round_half_up(report.currently.temperature),
        report.currently.summary,
        report.hourly.summary
    );

    let hours: Vec<&HourlyPoint> = report
        .hourly
        .data
        .iter()
        .skip(1)
        .take(columns.saturating_sub(1))
        .collect();
    if hours.is_empty() {
        return block;
    }

    let labels: Vec<String> = hours
        .iter()
        .map(|hour| hour_label(hour.time, timezone_offset_ms))
        .collect();
    let temperatures: Vec<String> = hours
        .iter()
        .map(|hour| format!("{}°", round_half_up(hour.temperature)))
        .collect();
    let summaries: Vec<String> = hours.iter().map(|hour| hour.summary.clone()).collect();

    let widths: Vec<usize> = (0..hours.len())
        .map(|col| {
            [&labels, &temperatures, &summaries]
                .iter()
                .filter_map(|row| row.get(col))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    for row in [&labels, &temperatures, &summaries] {
        block.push('\n');
        block.push_str(&aligned(row, &widths));
    }
    block
}

/// `H:MM` for an hourly point, shifted into the display time zone.
fn hour_label(epoch_seconds: i64, timezone_offset_ms: i64) -> String {
    let ms = epoch_seconds
        .saturating_mul(1000)
        .saturating_add(timezone_offset_ms);
    match DateTime::from_timestamp_millis(ms) {
        Some(at) => format!("{}:{:02}", at.hour(), at.minute()),
        None => String::from("-:--"),
    }
}

fn aligned(cells: &[String], widths: &[usize]) -> String {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    line.join(COLUMN_GAP).trim_end().to_owned()
}
