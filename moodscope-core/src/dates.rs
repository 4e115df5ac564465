//! Date normalization.
//!
//! Every raw date goes through [`normalize`] exactly once, at the boundary.
//! Day counting and display labels only ever see the tagged
//! [`NormalizedDate`], never a raw string or a nullable value.
//!
//! Accepted shapes:
//! - native instants and RFC 3339 strings (`2024-03-01T09:30:00Z`, `...+02:00`)
//! - ISO date-only strings (`2024-03-01`), read as UTC midnight
//! - ISO local date-times without offset (`2024-03-01T09:30`), read in the viewer's zone;
//!   wall-clock times skipped by a daylight-saving jump move forward past the gap
//! - epoch milliseconds
//!
//! Anything else is [`NormalizedDate::Invalid`].

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::fmt::{Display, Write};

use crate::types::RawDate;

/// Label shown in place of a date that could not be read.
pub const RECENT_LABEL: &str = "Recent";

/// Default date pattern (en-US short date, e.g. "3/1/2024").
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Default time pattern (two-digit hour and minute, e.g. "09:30 AM").
pub const DEFAULT_TIME_FORMAT: &str = "%I:%M %p";

/// Largest magnitude accepted for epoch milliseconds (±100,000,000 days).
const MAX_EPOCH_MILLIS: f64 = 8.64e15;

const LOCAL_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// A raw date after normalization into the viewer's time zone.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedDate<Tz: TimeZone> {
    /// Readable instant plus its calendar-day key in the viewer's zone
    Valid { instant: DateTime<Tz>, day: NaiveDate },
    /// Missing, unparseable or out of range
    Invalid,
}

impl<Tz: TimeZone> NormalizedDate<Tz> {
    fn from_instant(instant: DateTime<Tz>) -> Self {
        let day = instant.date_naive();
        NormalizedDate::Valid { instant, day }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, NormalizedDate::Valid { .. })
    }

    /// Calendar-day key used for grouping, `None` when invalid.
    pub fn day_key(&self) -> Option<NaiveDate> {
        match self {
            NormalizedDate::Valid { day, .. } => Some(*day),
            NormalizedDate::Invalid => None,
        }
    }

    pub fn instant(&self) -> Option<&DateTime<Tz>> {
        match self {
            NormalizedDate::Valid { instant, .. } => Some(instant),
            NormalizedDate::Invalid => None,
        }
    }
}

impl<Tz: TimeZone> NormalizedDate<Tz>
where
    Tz::Offset: Display,
{
    /// Date label using a strftime pattern, or [`RECENT_LABEL`].
    pub fn date_label(&self, pattern: &str) -> String {
        self.render(pattern).unwrap_or_else(|| RECENT_LABEL.to_string())
    }

    /// Time label using a strftime pattern, or an empty string.
    pub fn time_label(&self, pattern: &str) -> String {
        self.render(pattern).unwrap_or_default()
    }

    fn render(&self, pattern: &str) -> Option<String> {
        let instant = self.instant()?;
        let mut out = String::new();
        // A malformed pattern surfaces as fmt::Error rather than a panic here
        write!(out, "{}", instant.format(pattern)).ok()?;
        Some(out)
    }
}

/// Normalize a raw date into the viewer's time zone. Never fails.
pub fn normalize<Tz: TimeZone>(raw: &RawDate, tz: &Tz) -> NormalizedDate<Tz> {
    let instant = match raw {
        RawDate::Instant(instant) => Some(instant.with_timezone(tz)),
        RawDate::EpochMillis(ms) => from_epoch_millis(*ms).map(|dt| dt.with_timezone(tz)),
        RawDate::Text(text) => parse_text(text.trim(), tz),
        RawDate::Missing | RawDate::Unrecognized(_) => None,
    };

    match instant {
        Some(instant) => NormalizedDate::from_instant(instant),
        None => {
            tracing::trace!(?raw, "unreadable date treated as unknown time");
            NormalizedDate::Invalid
        }
    }
}

fn from_epoch_millis(ms: f64) -> Option<DateTime<Utc>> {
    if !ms.is_finite() || ms.abs() > MAX_EPOCH_MILLIS {
        return None;
    }
    DateTime::from_timestamp_millis(ms.trunc() as i64)
}

fn parse_text<Tz: TimeZone>(text: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    if text.is_empty() {
        return None;
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Some(instant.with_timezone(tz));
    }

    // Date-only ISO strings are UTC midnight, not local midnight
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        let midnight = date.and_hms_opt(0, 0, 0)?;
        return Some(Utc.from_utc_datetime(&midnight).with_timezone(tz));
    }

    LOCAL_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .and_then(|naive| resolve_local(naive, tz))
}

/// Map a wall-clock time to an instant, preferring the earlier of two
/// ambiguous readings. A time inside a forward gap is read with the offset
/// in force before the jump, which lands it one hour later on the clock.
fn resolve_local<Tz: TimeZone>(naive: NaiveDateTime, tz: &Tz) -> Option<DateTime<Tz>> {
    tz.from_local_datetime(&naive).earliest().or_else(|| {
        let shifted = naive.checked_add_signed(Duration::hours(1))?;
        tz.from_local_datetime(&shifted).earliest()
    })
}

/// Date label in the host's local zone with the default pattern.
///
/// Returns `"Recent"` for anything that does not normalize.
pub fn format_date(raw: &RawDate) -> String {
    normalize(raw, &Local).date_label(DEFAULT_DATE_FORMAT)
}

/// Time label in the host's local zone with the default pattern.
///
/// Returns an empty string for anything that does not normalize.
pub fn format_time(raw: &RawDate) -> String {
    normalize(raw, &Local).time_label(DEFAULT_TIME_FORMAT)
}
