//! # moodscope-core
//!
//! Core library for moodscope - mood history and insights.
//!
//! This library provides:
//! - Domain types for emotion detections and therapy sessions
//! - Date normalization that never fails on malformed input
//! - The history aggregation engine (ranking, activity days, recency feed)
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Architecture
//!
//! Data flows through three layers:
//! - **Layer 0 (Raw):** Collections handed over by the state provider (read-only)
//! - **Layer 1 (Normalized):** Tagged dates and closed emotion categories
//! - **Layer 2 (Derived):** Insights recomputed on every query, never stored
//!
//! ## Example
//!
//! ```rust
//! use chrono::Utc;
//! use moodscope_core::{top_emotions, unique_active_days, Emotion, EmotionRecord};
//!
//! let history = vec![
//!     EmotionRecord::new("a", Emotion::Happy, 0.9, "2024-03-01T09:00:00Z"),
//!     EmotionRecord::new("b", Emotion::Sad, 0.4, "2024-03-02T09:00:00Z"),
//! ];
//!
//! let top = top_emotions(&history);
//! assert_eq!(top[0].emotion, Emotion::Happy);
//! assert_eq!(unique_active_days(&history, &[], &Utc), 2);
//! ```

// Re-export commonly used items at the crate root
pub use analytics::{
    generate_insights, recent_feed, top_emotions, unique_active_days, EmotionShare,
    HistoryInsights, InsightsConfig,
};
pub use config::Config;
pub use dates::{format_date, format_time, normalize, NormalizedDate};
pub use error::{Error, Result};
pub use format::{bar_width, confidence_percent, percentage, round_half_up};
pub use presentation::{presentation_for, Presentation};
pub use snapshot::{HistorySnapshot, ViewState};
pub use types::*;

// Public modules
pub mod analytics;
pub mod config;
pub mod dates;
pub mod error;
pub mod format;
pub mod logging;
pub mod presentation;
pub mod snapshot;
pub mod types;
