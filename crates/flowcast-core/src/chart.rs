//! Date rendering shared by every table the engine emits.
//!
//! The chart renderer consumes dates as `Date(YYYY, M, D, H, Min)` with a
//! zero-indexed month. That text form is part of the output contract and
//! must not change.

use time::macros::format_description;
use time::{Date, OffsetDateTime, UtcOffset};

use crate::error::{FlowError, Result};

/// Render an instant in chart form, e.g. `Date(2024, 0, 31, 14, 5)`.
pub fn chart_date(ts: OffsetDateTime) -> String {
    format!(
        "Date({}, {}, {}, {}, {})",
        ts.year(),
        u8::from(ts.month()) - 1,
        ts.day(),
        ts.hour(),
        ts.minute()
    )
}

/// Render a calendar day in chart form at midnight.
pub fn chart_day(day: Date) -> String {
    format!(
        "Date({}, {}, {}, 0, 0)",
        day.year(),
        u8::from(day.month()) - 1,
        day.day()
    )
}

/// Calendar day of `ts` in UTC. Every per-day count buckets through this.
pub fn utc_day(ts: OffsetDateTime) -> Date {
    ts.to_offset(UtcOffset::UTC).date()
}

/// `YYYY-MM-DD`, used for annotations and tooltips.
pub fn iso_day(day: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        day.year(),
        u8::from(day.month()),
        day.day()
    )
}

/// Parse a `YYYY-MM-DD` day.
pub fn parse_day(s: &str) -> Result<Date> {
    Date::parse(s.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|e| FlowError::validation(format!("invalid date {s:?}: {e}")))
}
