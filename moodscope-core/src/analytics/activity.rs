//! Activity-day counting.
//!
//! A day is "active" when at least one detection or therapy session falls
//! on it in the viewer's time zone. Both collections go through the same
//! normalization, so a detection and a session on either side of midnight
//! land on the same local calendar days.

use chrono::{NaiveDate, TimeZone};
use std::collections::BTreeSet;

use crate::dates::normalize;
use crate::types::{EmotionRecord, TherapySession};

/// Distinct local calendar days touched by either collection.
///
/// Records whose date does not normalize contribute nothing.
pub fn active_days<Tz: TimeZone>(
    history: &[EmotionRecord],
    sessions: &[TherapySession],
    tz: &Tz,
) -> BTreeSet<NaiveDate> {
    let detection_days = history
        .iter()
        .filter_map(|record| normalize(record.effective_timestamp(), tz).day_key());
    let session_days = sessions
        .iter()
        .filter_map(|session| normalize(&session.date, tz).day_key());

    detection_days.chain(session_days).collect()
}

/// Number of distinct active days.
pub fn unique_active_days<Tz: TimeZone>(
    history: &[EmotionRecord],
    sessions: &[TherapySession],
    tz: &Tz,
) -> usize {
    active_days(history, sessions, tz).len()
}
