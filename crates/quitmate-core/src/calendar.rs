//! Local-calendar date helpers.
//!
//! All day-granular logic (consumption ledger, evolution checks, streaks)
//! keys on the user's local calendar day, not UTC. Timestamps are epoch
//! milliseconds throughout the crate.

use chrono::{DateTime, Local, NaiveDate, Utc};

/// Milliseconds in one day.
pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Current wall-clock time in epoch milliseconds.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Local calendar date for an epoch-millisecond timestamp.
///
/// Out-of-range timestamps collapse to the epoch date rather than panic;
/// callers feed wall-clock values.
pub fn local_date(ts_ms: i64) -> NaiveDate {
    DateTime::<Utc>::from_timestamp_millis(ts_ms)
        .unwrap_or_default()
        .with_timezone(&Local)
        .date_naive()
}

/// The calendar day before `date`.
pub fn previous_day(date: NaiveDate) -> NaiveDate {
    date.pred_opt().unwrap_or(date)
}

/// UTC instant for an epoch-millisecond timestamp, for event stamping.
pub fn utc_time(ts_ms: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(ts_ms).unwrap_or_default()
}

/// Whole elapsed days between two timestamps, floored at zero.
pub fn elapsed_days(from_ms: i64, to_ms: i64) -> i64 {
    ((to_ms - from_ms) / DAY_MS).max(0)
}
