//! Integration tests for the history aggregation engine
//!
//! These tests drive the public API end to end: a snapshot decoded from
//! `tests/fixtures/history.json`, the individual aggregations, and the
//! composed insights.

use chrono::{FixedOffset, NaiveDate, Utc};
use moodscope_core::analytics::{active_days, rank_emotions, take_recent};
use moodscope_core::{
    format_date, format_time, generate_insights, logging, percentage, presentation_for,
    recent_feed, top_emotions, unique_active_days, Emotion, EmotionRecord, HistorySnapshot,
    InsightsConfig, RawDate, TherapySession, ViewState,
};
use std::path::PathBuf;

/// Get the path to a fixture file
fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn load_fixture() -> HistorySnapshot {
    logging::init_test();
    HistorySnapshot::from_path(&fixture_path("history.json")).expect("fixture should decode")
}

fn record(id: &str, emotion: &str, confidence: f64, ts: &str) -> EmotionRecord {
    EmotionRecord::new(id, emotion, confidence, ts)
}

// ============================================
// Scenarios
// ============================================

#[test]
fn test_three_detection_scenario() {
    let history = vec![
        record("1", "happy", 0.9, "2024-03-01T09:00:00Z"),
        record("2", "happy", 0.8, "2024-03-01T17:00:00Z"),
        record("3", "sad", 0.5, "2024-03-03T09:00:00Z"),
    ];

    let top: Vec<_> = top_emotions(&history)
        .into_iter()
        .map(|s| (s.emotion, s.count, s.percentage))
        .collect();
    assert_eq!(top, vec![(Emotion::Happy, 2, 67), (Emotion::Sad, 1, 33)]);

    assert_eq!(unique_active_days(&history, &[], &Utc), 2);

    let feed = recent_feed(&history);
    assert_eq!(feed.len(), 3);
    assert_eq!(
        feed.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(),
        vec!["1", "2", "3"]
    );
}

#[test]
fn test_unreadable_timestamp_scenario() {
    let history = vec![
        record("ok", "neutral", 0.6, "2024-03-01T09:00:00Z"),
        record("bad", "fear", 0.3, "not-a-date"),
    ];

    assert_eq!(unique_active_days(&history, &[], &Utc), 1);

    let feed = recent_feed(&history);
    assert_eq!(feed[1].id, "bad");
    assert_eq!(format_date(&feed[1].timestamp), "Recent");
    assert_eq!(format_time(&feed[1].timestamp), "");

    let insights = generate_insights(&history, &[], &InsightsConfig::default(), &Utc);
    assert_eq!(insights.recent[1].date_label, "Recent");
    assert_eq!(insights.recent[1].time_label, "");
}

#[test]
fn test_format_helpers_on_absent_values() {
    assert_eq!(format_date(&RawDate::Missing), "Recent");
    assert_eq!(format_time(&RawDate::Missing), "");
}

#[test]
fn test_percentage_examples() {
    assert_eq!(percentage(5, 10), Some(50));
    assert_eq!(percentage(1, 3), Some(33));
}

// ============================================
// Properties
// ============================================

fn varied_history() -> Vec<EmotionRecord> {
    let labels = [
        "happy", "sad", "sad", "fear", "happy", "neutral", "angry", "sad", "surprised",
        "contempt", "happy", "fear", "neutral", "sad",
    ];
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let ts = format!("2024-03-{:02}T{:02}:15:00Z", 1 + i % 5, (i * 7) % 24);
            record(&format!("r{i}"), label, 0.1 * (i % 10) as f64, &ts)
        })
        .collect()
}

#[test]
fn test_ranking_bounds_and_order() {
    let history = varied_history();

    for len in 0..=history.len() {
        let slice = &history[..len];
        let top = top_emotions(slice);

        assert!(top.len() <= 3);
        let kept: usize = top.iter().map(|s| s.count).sum();
        assert!(kept <= slice.len());
        assert!(top.windows(2).all(|w| w[0].count >= w[1].count));
    }
}

#[test]
fn test_ranking_ties_follow_first_appearance() {
    let history = varied_history();
    let all = rank_emotions(&history, usize::MAX);

    let first_seen = |emotion: &Emotion| {
        history
            .iter()
            .position(|r| &r.emotion == emotion)
            .expect("ranked category must appear in history")
    };

    for pair in all.windows(2) {
        if pair[0].count == pair[1].count {
            assert!(first_seen(&pair[0].emotion) < first_seen(&pair[1].emotion));
        }
    }
}

#[test]
fn test_active_days_ignore_order() {
    let history = varied_history();
    let sessions = vec![
        TherapySession::new("a", "2024-03-09T10:00:00Z", 30),
        TherapySession::new("b", "2024-03-01", 45),
        TherapySession::new("c", "garbage", 15),
    ];
    let expected = unique_active_days(&history, &sessions, &Utc);

    let mut reversed_history = history.clone();
    reversed_history.reverse();
    let mut rotated_sessions = sessions.clone();
    rotated_sessions.rotate_left(1);

    assert_eq!(
        unique_active_days(&reversed_history, &rotated_sessions, &Utc),
        expected
    );
    assert_eq!(expected, 6);
}

#[test]
fn test_active_days_empty() {
    assert_eq!(unique_active_days(&[], &[], &Utc), 0);
    assert_eq!(unique_active_days(&[], &[], &FixedOffset::east_opt(3600).unwrap()), 0);
}

#[test]
fn test_recent_feed_is_bounded_prefix() {
    let history = varied_history();

    for len in 0..=history.len() {
        let slice = &history[..len];
        let feed = recent_feed(slice);
        assert!(feed.len() <= 10);
        assert_eq!(feed, &slice[..feed.len()]);
    }
    assert_eq!(take_recent(&history, 4).len(), 4);
}

// ============================================
// Fixture snapshot
// ============================================

#[test]
fn test_fixture_insights() {
    let snapshot = load_fixture();
    let tz = FixedOffset::west_opt(5 * 3600).unwrap();

    let insights = match snapshot.view(&InsightsConfig::default(), &tz) {
        ViewState::Ready(insights) => insights,
        ViewState::Loading => panic!("fixture is not loading"),
    };

    assert_eq!(insights.totals.detections, 12);
    assert_eq!(insights.totals.therapy_sessions, 3);

    let days = active_days(&snapshot.emotion_history, &snapshot.therapy_sessions, &tz);
    assert_eq!(insights.totals.active_days, days.len());
    assert!(days.contains(&NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()));

    let top: Vec<_> = insights
        .top_emotions
        .iter()
        .map(|s| (s.emotion.as_str(), s.count, s.percentage))
        .collect();
    assert_eq!(top, vec![("happy", 4, 33), ("sad", 3, 25), ("neutral", 2, 17)]);

    assert_eq!(insights.recent.len(), 10);
    assert_eq!(insights.recent[0].key, "65f1a0c2");
    assert_eq!(insights.recent[0].presentation, presentation_for(&Emotion::Happy));

    assert_eq!(insights.sessions.len(), 3);
    assert_eq!(insights.sessions[0].messages_display(), "4 messages exchanged");
    assert_eq!(insights.sessions[2].date_label, "Recent");
}

#[test]
fn test_fixture_is_not_mutated() {
    let snapshot = load_fixture();
    let before = snapshot.clone();

    let config = InsightsConfig {
        confidence_policy: moodscope_core::format::ConfidencePolicy::Clamp,
        ..Default::default()
    };
    let _ = snapshot.view(&config, &Utc);

    assert_eq!(snapshot, before);
}
