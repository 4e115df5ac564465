//! Mood History & Insights
//!
//! Runs every aggregation over one snapshot of the two collections and
//! returns the values the history page renders. Nothing is cached: each
//! call recomputes from the slices it is given.

use chrono::TimeZone;
use serde::Serialize;
use std::fmt::Display;

use super::activity::unique_active_days;
use super::ranking::{rank_emotions, EmotionShare, TOP_EMOTIONS};
use super::recency::{take_recent, FeedEntry, RECENT_FEED_LIMIT};
use crate::config::Config;
use crate::dates::{normalize, DEFAULT_DATE_FORMAT, DEFAULT_TIME_FORMAT};
use crate::format::ConfidencePolicy;
use crate::types::{capitalize_words, Emotion, EmotionRecord, TherapySession};

/// Shown in the feed panel when there are no detections.
pub const EMPTY_FEED_MESSAGE: &str = "No emotion data yet. Start detection to see your history!";

/// Shown in the insights panel when there are no detections.
pub const EMPTY_INSIGHTS_MESSAGE: &str = "Start using the app to see insights!";

/// Shown in the sessions panel when there are no sessions.
pub const EMPTY_SESSIONS_MESSAGE: &str = "No therapy sessions yet.";

/// Configuration for insights generation.
#[derive(Debug, Clone)]
pub struct InsightsConfig {
    /// Number of top categories to include
    pub top_emotions_count: usize,
    /// Number of detections in the recency feed
    pub recent_limit: usize,
    /// strftime pattern for date labels
    pub date_format: String,
    /// strftime pattern for time labels
    pub time_format: String,
    /// Treatment of out-of-range confidences
    pub confidence_policy: ConfidencePolicy,
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            top_emotions_count: TOP_EMOTIONS,
            recent_limit: RECENT_FEED_LIMIT,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            confidence_policy: ConfidencePolicy::Faithful,
        }
    }
}

impl InsightsConfig {
    /// Build from the `[insights]` and `[display]` sections of the config file.
    pub fn from_config(config: &Config) -> Self {
        Self {
            top_emotions_count: config.insights.top_emotions,
            recent_limit: config.insights.recent_limit,
            date_format: config.display.date_format.clone(),
            time_format: config.display.time_format.clone(),
            confidence_policy: ConfidencePolicy::from_clamp_flag(config.display.clamp_confidence),
        }
    }
}

/// Header counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TotalStats {
    /// Every detection in the history
    pub detections: usize,
    /// Every therapy session
    pub therapy_sessions: usize,
    /// Distinct local calendar days with any activity
    pub active_days: usize,
}

/// Display row for one therapy session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionEntry {
    /// Record key (`_id` or `id`)
    pub key: String,
    /// Date label, "Recent" when unknown
    pub date_label: String,
    /// Length in minutes
    pub duration_minutes: u32,
    /// Messages exchanged
    pub message_count: usize,
    /// Detected mood, if any
    pub mood: Option<Emotion>,
    /// Therapy specialty, if any
    pub specialty: Option<String>,
}

impl SessionEntry {
    pub fn from_session<Tz: TimeZone>(
        session: &TherapySession,
        config: &InsightsConfig,
        tz: &Tz,
    ) -> Self
    where
        Tz::Offset: Display,
    {
        Self {
            key: session.key().to_string(),
            date_label: normalize(&session.date, tz).date_label(&config.date_format),
            duration_minutes: session.duration,
            message_count: session.message_count(),
            // Empty labels are treated as absent
            mood: session
                .detected_emotion
                .clone()
                .filter(|e| !e.as_str().is_empty()),
            specialty: session.specialty.clone().filter(|s| !s.is_empty()),
        }
    }

    /// Duration for display (e.g., "45 min").
    pub fn duration_display(&self) -> String {
        format!("{} min", self.duration_minutes)
    }

    /// Message count for display (e.g., "12 messages exchanged").
    pub fn messages_display(&self) -> String {
        format!("{} messages exchanged", self.message_count)
    }

    /// Mood with each word capitalized.
    pub fn mood_display(&self) -> Option<String> {
        self.mood.as_ref().map(Emotion::display_name)
    }

    /// Specialty with each word capitalized.
    pub fn specialty_display(&self) -> Option<String> {
        self.specialty.as_deref().map(capitalize_words)
    }
}

/// Complete derived view of one history snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryInsights {
    /// Header counters
    pub totals: TotalStats,
    /// Most frequent categories
    pub top_emotions: Vec<EmotionShare>,
    /// First detections as ordered upstream
    pub recent: Vec<FeedEntry>,
    /// Every session, in input order
    pub sessions: Vec<SessionEntry>,
}

impl HistoryInsights {
    /// True when there are neither detections nor sessions.
    pub fn is_empty(&self) -> bool {
        self.totals.detections == 0 && self.totals.therapy_sessions == 0
    }
}

/// Generate insights for one snapshot of the two collections.
pub fn generate_insights<Tz: TimeZone>(
    history: &[EmotionRecord],
    sessions: &[TherapySession],
    config: &InsightsConfig,
    tz: &Tz,
) -> HistoryInsights
where
    Tz::Offset: Display,
{
    let totals = TotalStats {
        detections: history.len(),
        therapy_sessions: sessions.len(),
        active_days: unique_active_days(history, sessions, tz),
    };

    let top_emotions = rank_emotions(history, config.top_emotions_count);

    let recent: Vec<FeedEntry> = take_recent(history, config.recent_limit)
        .iter()
        .map(|record| FeedEntry::from_record(record, config, tz))
        .collect();

    let session_entries: Vec<SessionEntry> = sessions
        .iter()
        .map(|session| SessionEntry::from_session(session, config, tz))
        .collect();

    let undated = recent.iter().filter(|e| e.time_label.is_empty()).count();

    tracing::debug!(
        detections = totals.detections,
        sessions = totals.therapy_sessions,
        active_days = totals.active_days,
        top = top_emotions.len(),
        recent = recent.len(),
        undated,
        "Generated history insights"
    );

    HistoryInsights {
        totals,
        top_emotions,
        recent,
        sessions: session_entries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_default_config() {
        let config = InsightsConfig::default();
        assert_eq!(config.top_emotions_count, 3);
        assert_eq!(config.recent_limit, 10);
        assert_eq!(config.confidence_policy, ConfidencePolicy::Faithful);
    }

    #[test]
    fn test_from_config() {
        let mut config = Config::default();
        config.insights.top_emotions = 5;
        config.display.clamp_confidence = true;

        let insights_config = InsightsConfig::from_config(&config);
        assert_eq!(insights_config.top_emotions_count, 5);
        assert_eq!(insights_config.recent_limit, 10);
        assert_eq!(insights_config.confidence_policy, ConfidencePolicy::Clamp);
    }

    #[test]
    fn test_empty_snapshot() {
        let insights = generate_insights(&[], &[], &InsightsConfig::default(), &Utc);
        assert!(insights.is_empty());
        assert_eq!(insights.totals, TotalStats::default());
        assert!(insights.top_emotions.is_empty());
        assert!(insights.recent.is_empty());
        assert!(insights.sessions.is_empty());
    }

    #[test]
    fn test_session_entry_display() {
        let mut session = TherapySession::new("s1", "2024-03-02T18:00:00Z", 45);
        session.messages = vec![serde_json::json!({}); 12];
        session.detected_emotion = Some(Emotion::Sad);
        session.specialty = Some("grief counseling".to_string());

        let entry = SessionEntry::from_session(&session, &InsightsConfig::default(), &Utc);
        assert_eq!(entry.date_label, "3/2/2024");
        assert_eq!(entry.duration_display(), "45 min");
        assert_eq!(entry.messages_display(), "12 messages exchanged");
        assert_eq!(entry.mood_display().as_deref(), Some("Sad"));
        assert_eq!(entry.specialty_display().as_deref(), Some("Grief Counseling"));
    }

    #[test]
    fn test_session_entry_blank_fields() {
        let mut session = TherapySession::new("s2", "garbage", 0);
        session.detected_emotion = Some(Emotion::from(""));
        session.specialty = Some(String::new());

        let entry = SessionEntry::from_session(&session, &InsightsConfig::default(), &Utc);
        assert_eq!(entry.date_label, "Recent");
        assert_eq!(entry.mood, None);
        assert_eq!(entry.specialty, None);
        assert_eq!(entry.messages_display(), "0 messages exchanged");
    }

    #[test]
    fn test_generate_insights() {
        let history = vec![
            EmotionRecord::new("1", Emotion::Happy, 0.9, "2024-03-03T10:00:00Z"),
            EmotionRecord::new("2", Emotion::Sad, 0.4, "2024-03-02T10:00:00Z"),
            EmotionRecord::new("3", Emotion::Happy, 0.7, "2024-03-02T08:00:00Z"),
        ];
        let sessions = vec![TherapySession::new("s", "2024-03-01T18:00:00Z", 30)];
        let config = InsightsConfig {
            recent_limit: 2,
            ..Default::default()
        };

        let insights = generate_insights(&history, &sessions, &config, &Utc);
        assert_eq!(
            insights.totals,
            TotalStats {
                detections: 3,
                therapy_sessions: 1,
                active_days: 3,
            }
        );
        assert_eq!(insights.top_emotions[0].emotion, Emotion::Happy);
        assert_eq!(insights.top_emotions[0].percentage, 67);
        assert_eq!(insights.recent.len(), 2);
        assert_eq!(insights.recent[0].key, "1");
        assert_eq!(insights.sessions[0].duration_display(), "30 min");
    }
}
