//! Recency feed.
//!
//! The feed is the first N detections exactly as the state provider ordered
//! them. Upstream is responsible for most-recent-first ordering; nothing
//! here sorts by timestamp.

use chrono::TimeZone;
use serde::Serialize;
use std::fmt::Display;

use super::insights::InsightsConfig;
use crate::dates::normalize;
use crate::format::{bar_width, confidence_percent};
use crate::presentation::{presentation_for, Presentation};
use crate::types::{Emotion, EmotionRecord};

/// Number of detections shown in the feed.
pub const RECENT_FEED_LIMIT: usize = 10;

/// The first `limit` detections, in input order.
pub fn take_recent(history: &[EmotionRecord], limit: usize) -> &[EmotionRecord] {
    &history[..history.len().min(limit)]
}

/// The first ten detections, in input order.
pub fn recent_feed(history: &[EmotionRecord]) -> &[EmotionRecord] {
    take_recent(history, RECENT_FEED_LIMIT)
}

/// Display row for one detection in the feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedEntry {
    /// Record key (`_id` or `id`)
    pub key: String,
    /// Category
    pub emotion: Emotion,
    /// Icon and gradient
    pub presentation: Presentation,
    /// Date label, "Recent" when unknown
    pub date_label: String,
    /// Time label, empty when unknown
    pub time_label: String,
    /// Confidence as a whole percentage
    pub confidence_percent: i64,
    /// Progress-bar width (e.g., "87.4%")
    pub bar_width: String,
}

impl FeedEntry {
    /// Build the display row for a record.
    pub fn from_record<Tz: TimeZone>(
        record: &EmotionRecord,
        config: &InsightsConfig,
        tz: &Tz,
    ) -> Self
    where
        Tz::Offset: Display,
    {
        let when = normalize(record.effective_timestamp(), tz);
        let confidence = config.confidence_policy.apply(record.confidence);

        Self {
            key: record.key().to_string(),
            emotion: record.emotion.clone(),
            presentation: presentation_for(&record.emotion),
            date_label: when.date_label(&config.date_format),
            time_label: when.time_label(&config.time_format),
            confidence_percent: confidence_percent(confidence),
            bar_width: bar_width(confidence),
        }
    }

    /// "date at time" line, dropping the time when it is unknown.
    pub fn when_display(&self) -> String {
        if self.time_label.is_empty() {
            self.date_label.clone()
        } else {
            format!("{} at {}", self.date_label, self.time_label)
        }
    }
}
