//! Relative timestamps ("5 minutes ago").

use chrono::{DateTime, NaiveDateTime, Utc};
use maud::{html, Markup, Render};

/// Parse a timestamp as returned by the remote service.
///
/// Accepts RFC 3339 as well as the `2022-10-01 10:00:00.123+00` form
/// Postgres produces; timestamps without an offset are taken as UTC.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Describe how long before `now` the timestamp `then` was.
#[must_use]
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds().max(0);

    let (amount, unit) = match seconds {
        0..=44 => return "just now".to_string(),
        45..=3_599 => ((seconds + 30) / 60, "minute"),
        3_600..=86_399 => (seconds / 3_600, "hour"),
        86_400..=2_591_999 => (seconds / 86_400, "day"),
        2_592_000..=31_535_999 => (seconds / 2_592_000, "month"),
        _ => (seconds / 31_536_000, "year"),
    };

    let amount = amount.max(1);
    if amount == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{amount} {unit}s ago")
    }
}

/// A `<time>` element showing relative time, with the raw value as tooltip.
///
/// Unparseable timestamps are shown as-is.
#[derive(Debug, Clone, Copy)]
pub struct TimeAgo<'a> {
    raw: &'a str,
}

impl<'a> TimeAgo<'a> {
    #[must_use]
    pub const fn new(raw: &'a str) -> Self {
        Self { raw }
    }
}

impl Render for TimeAgo<'_> {
    fn render(&self) -> Markup {
        match parse_timestamp(self.raw) {
            Some(then) => html! {
                time datetime=(self.raw) title=(self.raw) { (time_ago(then, Utc::now())) }
            },
            None => html! { time { (self.raw) } },
        }
    }
}
