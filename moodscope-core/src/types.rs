//! Core domain types for moodscope
//!
//! These types describe the raw collections handed over by the state
//! provider (Layer 0). They are read-only snapshots: nothing in the engine
//! mutates, reorders or deletes them.
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Detection** | One [`EmotionRecord`]: a timestamped emotion with a confidence score |
//! | **Session** | One [`TherapySession`]: a completed therapy interaction |
//! | **Category** | An [`Emotion`], closed set plus an explicit [`Emotion::Other`] |
//! | **Raw date** | A [`RawDate`] as it arrived, before [`crate::dates::normalize`] |
//!
//! ### Lenient decoding
//!
//! The upstream store is loosely typed. Fields that are `null`, absent or
//! of the wrong JSON type decode to their defaults instead of failing the
//! whole snapshot: numeric ids become their decimal text, numeric strings
//! count as numbers, and fractional durations round to whole minutes.
//! Dates keep whatever shape they arrived in until normalization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

use crate::format::round_half_up;

// ============================================
// Lenient field decoding
// ============================================

/// Decode `null` the same way as an absent field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Strings and numbers as text; anything else yields `None`.
fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
    }
}

/// A number, or a string holding one.
fn scalar_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?))
}

/// Numbers and numeric strings; anything else reads as 0.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_number(&Value::deserialize(deserializer)?).unwrap_or(0.0))
}

/// Whole minutes, rounded half up; negative or non-numeric values read as 0.
fn lenient_minutes<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let minutes = scalar_number(&Value::deserialize(deserializer)?)
        .filter(|m| m.is_finite())
        .map(round_half_up)
        .unwrap_or(0.0);
    Ok(minutes.clamp(0.0, u32::MAX as f64) as u32)
}

fn lenient_emotion<'de, D>(deserializer: D) -> Result<Emotion, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?)
        .map(Emotion::from)
        .unwrap_or_default())
}

fn lenient_opt_emotion<'de, D>(deserializer: D) -> Result<Option<Emotion>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?).map(Emotion::from))
}

/// Only arrays count as message lists.
fn lenient_messages<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items),
        _ => Ok(Vec::new()),
    }
}

// ============================================
// Raw dates
// ============================================

/// A point in time exactly as the upstream store delivered it.
///
/// Variant order matters for untagged decoding: a string that is already a
/// valid RFC 3339 instant lands in [`RawDate::Instant`], any other string in
/// [`RawDate::Text`], and values of the wrong JSON type in
/// [`RawDate::Unrecognized`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDate {
    /// Native instant
    Instant(DateTime<Utc>),
    /// Milliseconds since the Unix epoch
    EpochMillis(f64),
    /// Any other string (ISO date, local date-time, or garbage)
    Text(String),
    /// Absent or `null`
    #[default]
    Missing,
    /// Booleans, objects, arrays
    Unrecognized(serde_json::Value),
}

impl RawDate {
    /// True when the value carries no time information: absent, `null`,
    /// an empty string, or the zero epoch.
    ///
    /// A present but unparseable value is *not* absent.
    pub fn is_absent(&self) -> bool {
        match self {
            RawDate::Missing => true,
            RawDate::Text(s) => s.is_empty(),
            RawDate::EpochMillis(ms) => *ms == 0.0,
            RawDate::Instant(_) | RawDate::Unrecognized(_) => false,
        }
    }
}

impl From<DateTime<Utc>> for RawDate {
    fn from(value: DateTime<Utc>) -> Self {
        RawDate::Instant(value)
    }
}

impl From<&str> for RawDate {
    fn from(value: &str) -> Self {
        RawDate::Text(value.to_string())
    }
}

impl From<String> for RawDate {
    fn from(value: String) -> Self {
        RawDate::Text(value)
    }
}

impl<T: Into<RawDate>> From<Option<T>> for RawDate {
    fn from(value: Option<T>) -> Self {
        value.map_or(RawDate::Missing, Into::into)
    }
}

// ============================================
// Emotion categories
// ============================================

/// Detected emotion category.
///
/// Recognized labels map to named variants; anything else is kept verbatim
/// in [`Emotion::Other`] so it still counts and renders with the fallback
/// presentation. Matching is exact: `"Happy"` is not `happy`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Emotion {
    Happy,
    Sad,
    Neutral,
    Surprised,
    Angry,
    Fear,
    /// Unrecognized label, preserved as received
    Other(String),
}

impl Emotion {
    pub fn as_str(&self) -> &str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Neutral => "neutral",
            Emotion::Surprised => "surprised",
            Emotion::Angry => "angry",
            Emotion::Fear => "fear",
            Emotion::Other(label) => label,
        }
    }

    /// Label with each word capitalized (e.g., "Happy", "Mildly anxious" -> "Mildly Anxious").
    pub fn display_name(&self) -> String {
        capitalize_words(self.as_str())
    }
}

impl Default for Emotion {
    fn default() -> Self {
        Emotion::Other("unknown".to_string())
    }
}

impl From<&str> for Emotion {
    fn from(value: &str) -> Self {
        match value {
            "happy" => Emotion::Happy,
            "sad" => Emotion::Sad,
            "neutral" => Emotion::Neutral,
            "surprised" => Emotion::Surprised,
            "angry" => Emotion::Angry,
            "fear" => Emotion::Fear,
            other => Emotion::Other(other.to_string()),
        }
    }
}

impl From<String> for Emotion {
    fn from(value: String) -> Self {
        match Emotion::from(value.as_str()) {
            Emotion::Other(_) => Emotion::Other(value),
            known => known,
        }
    }
}

impl From<Emotion> for String {
    fn from(value: Emotion) -> Self {
        match value {
            Emotion::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uppercase the first character of every whitespace-separated word.
pub(crate) fn capitalize_words(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_whitespace() {
            at_word_start = true;
            out.push(c);
        } else if at_word_start {
            at_word_start = false;
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

// ============================================
// Records
// ============================================

/// One emotion detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionRecord {
    /// Opaque identifier; numeric ids are kept as their decimal text
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    /// Identifier assigned by the document store, preferred over `id` when present
    #[serde(
        rename = "_id",
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub store_id: Option<String>,
    /// Detected category
    #[serde(default, deserialize_with = "lenient_emotion")]
    pub emotion: Emotion,
    /// Detector confidence, nominally 0.0..=1.0 (not enforced)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub confidence: f64,
    /// When the detection happened
    #[serde(default)]
    pub timestamp: RawDate,
    /// When the record was stored; used only when `timestamp` is absent
    #[serde(default, skip_serializing_if = "RawDate::is_absent")]
    pub created_at: RawDate,
}

impl EmotionRecord {
    pub fn new(
        id: impl Into<String>,
        emotion: impl Into<Emotion>,
        confidence: f64,
        timestamp: impl Into<RawDate>,
    ) -> Self {
        Self {
            id: id.into(),
            store_id: None,
            emotion: emotion.into(),
            confidence,
            timestamp: timestamp.into(),
            created_at: RawDate::Missing,
        }
    }

    /// Stable key for display lists (`_id`, falling back to `id`).
    pub fn key(&self) -> &str {
        self.store_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .unwrap_or(&self.id)
    }

    /// The timestamp used for day counting and display.
    ///
    /// Falls back to `created_at` only when `timestamp` is absent; a present
    /// but unparseable `timestamp` is kept and later normalizes to invalid.
    pub fn effective_timestamp(&self) -> &RawDate {
        if self.timestamp.is_absent() {
            &self.created_at
        } else {
            &self.timestamp
        }
    }
}

/// One completed therapy session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TherapySession {
    /// Opaque identifier
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    /// Identifier assigned by the document store
    #[serde(
        rename = "_id",
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub store_id: Option<String>,
    /// When the session took place
    #[serde(default)]
    pub date: RawDate,
    /// Length in whole minutes
    #[serde(default, deserialize_with = "lenient_minutes")]
    pub duration: u32,
    /// Conversation entries; only the count is used
    #[serde(default, deserialize_with = "lenient_messages")]
    pub messages: Vec<Value>,
    /// Mood detected during the session
    #[serde(default, deserialize_with = "lenient_opt_emotion")]
    pub detected_emotion: Option<Emotion>,
    /// Therapy specialty label
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub specialty: Option<String>,
}

impl TherapySession {
    pub fn new(id: impl Into<String>, date: impl Into<RawDate>, duration: u32) -> Self {
        Self {
            id: id.into(),
            store_id: None,
            date: date.into(),
            duration,
            messages: Vec::new(),
            detected_emotion: None,
            specialty: None,
        }
    }

    /// Stable key for display lists (`_id`, falling back to `id`).
    pub fn key(&self) -> &str {
        self.store_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .unwrap_or(&self.id)
    }

    /// Number of messages exchanged.
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }
}
