//! NX-OS duration strings
//!
//! Structured output renders neighbor uptimes and similar elapsed-time
//! fields as ISO-8601-style duration strings: `P14DT19H11M58S`, `PT2M30S`.
//! This module turns them into [`std::time::Duration`] for sorting and
//! display.
//!
//! Only week/day/hour/minute/second designators are supported; calendar
//! units (years, months) have no fixed length and parse as `None`, as does
//! anything else that is not a duration. Callers fall back to showing the
//! raw string.

use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Duration;

static DURATION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^P(?:(\d+)W)?(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?)?$").unwrap()
});

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: u64 = 24 * SECS_PER_HOUR;
const SECS_PER_WEEK: u64 = 7 * SECS_PER_DAY;

/// Parse an NX-OS duration string. `None` for anything that is not one,
/// including bare `P`/`PT` with no components.
pub fn parse(text: &str) -> Option<Duration> {
    let caps = DURATION_REGEX.captures(text)?;

    let mut seen_component = false;
    let mut secs: u64 = 0;
    for (group, unit) in [
        (1, SECS_PER_WEEK),
        (2, SECS_PER_DAY),
        (3, SECS_PER_HOUR),
        (4, SECS_PER_MINUTE),
        (5, 1),
    ] {
        if let Some(m) = caps.get(group) {
            seen_component = true;
            let n: u64 = m.as_str().parse().ok()?;
            secs = secs.checked_add(n.checked_mul(unit)?)?;
        }
    }

    seen_component.then(|| Duration::from_secs(secs))
}

/// Render a duration the way an operator reads it: `14d 19h 11m 58s`.
/// Leading zero units are dropped; a zero duration renders as `0s`.
pub fn brief(duration: Duration) -> String {
    let mut secs = duration.as_secs();
    let days = secs / SECS_PER_DAY;
    secs %= SECS_PER_DAY;
    let hours = secs / SECS_PER_HOUR;
    secs %= SECS_PER_HOUR;
    let minutes = secs / SECS_PER_MINUTE;
    secs %= SECS_PER_MINUTE;

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{}d", days));
    }
    if hours > 0 || !parts.is_empty() {
        parts.push(format!("{}h", hours));
    }
    if minutes > 0 || !parts.is_empty() {
        parts.push(format!("{}m", minutes));
    }
    parts.push(format!("{}s", secs));
    parts.join(" ")
}
