//! Duration formatting for console and run log output

use std::time::Duration;

const HOUR_MS: u128 = 3_600_000;

/// Format a duration as `MM:SS.mmm`, or `H:MM:SS.mmm` once it spans an hour.
///
/// Sub-millisecond precision is truncated, never rounded.
pub fn format_duration(d: Duration) -> String {
    layout(d, spans_hour(d))
}

/// Format two durations that share one line (elapsed and delta of a split).
///
/// Both columns switch to the hour layout if either value spans an hour.
pub fn format_pair(first: Duration, second: Duration) -> (String, String) {
    let with_hours = spans_hour(first) || spans_hour(second);
    (layout(first, with_hours), layout(second, with_hours))
}

fn spans_hour(d: Duration) -> bool {
    d.as_millis() >= HOUR_MS
}

fn layout(d: Duration, with_hours: bool) -> String {
    let total_ms = d.as_millis();
    let millis = total_ms % 1000;
    let seconds = (total_ms / 1000) % 60;

    if with_hours {
        let minutes = (total_ms / 60_000) % 60;
        let hours = total_ms / HOUR_MS;
        format!("{}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
    } else {
        let minutes = total_ms / 60_000;
        format!("{:02}:{:02}.{:03}", minutes, seconds, millis)
    }
}
