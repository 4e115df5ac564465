//! History snapshots and the loading gate.
//!
//! A [`HistorySnapshot`] is what the state provider hands over: both
//! collections plus its `isLoading` flag. While loading, the engine is not
//! run at all and the caller shows a placeholder instead.

use chrono::TimeZone;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt::Display;
use std::path::Path;

use crate::analytics::{generate_insights, HistoryInsights, InsightsConfig};
use crate::error::Result;
use crate::types::{null_as_default, EmotionRecord, TherapySession};

/// Placeholder text shown while the state provider is still loading.
pub const LOADING_MESSAGE: &str = "Loading your journey...";

/// Decode a collection one entry at a time.
///
/// `null` or a non-array reads as empty; entries that are not records are
/// skipped with a warning so one bad item never hides the rest.
fn lenient_records<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };

    Ok(items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(index, error = %e, "Skipping undecodable entry");
                None
            }
        })
        .collect())
}

/// Input contract from the state provider (camelCase JSON).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySnapshot {
    /// Detections, most recent first as delivered upstream
    #[serde(default, deserialize_with = "lenient_records")]
    pub emotion_history: Vec<EmotionRecord>,
    /// Therapy sessions
    #[serde(default, deserialize_with = "lenient_records")]
    pub therapy_sessions: Vec<TherapySession>,
    /// True while the provider is still fetching
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_loading: bool,
}

/// What the history page should show for a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    /// Provider still loading; show [`LOADING_MESSAGE`]
    Loading,
    /// Derived insights ready to render
    Ready(HistoryInsights),
}

impl HistorySnapshot {
    /// Decode a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and decode a snapshot file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let snapshot = Self::from_json(&content)?;

        tracing::debug!(
            path = %path.display(),
            detections = snapshot.emotion_history.len(),
            sessions = snapshot.therapy_sessions.len(),
            is_loading = snapshot.is_loading,
            "Loaded history snapshot"
        );

        Ok(snapshot)
    }

    /// Apply the loading gate, running the engine only when data is ready.
    pub fn view<Tz: TimeZone>(&self, config: &InsightsConfig, tz: &Tz) -> ViewState
    where
        Tz::Offset: Display,
    {
        if self.is_loading {
            tracing::debug!("Snapshot still loading, skipping aggregation");
            return ViewState::Loading;
        }

        ViewState::Ready(generate_insights(
            &self.emotion_history,
            &self.therapy_sessions,
            config,
            tz,
        ))
    }
}
