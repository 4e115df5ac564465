//! Analytics module for moodscope
//!
//! The history aggregation engine. Every function here is pure: it borrows
//! the two collections for the duration of the call, never mutates them,
//! and recomputes its result from scratch.
//!
//! - [`ranking`]: most frequent emotion categories
//! - [`activity`]: distinct active calendar days
//! - [`recency`]: the recency feed
//! - [`insights`]: everything above, composed for the history page

pub mod activity;
pub mod insights;
pub mod ranking;
pub mod recency;

pub use activity::{active_days, unique_active_days};
pub use insights::{
    generate_insights, HistoryInsights, InsightsConfig, SessionEntry, TotalStats,
    EMPTY_FEED_MESSAGE, EMPTY_INSIGHTS_MESSAGE, EMPTY_SESSIONS_MESSAGE,
};
pub use ranking::{count_emotions, rank_emotions, top_emotions, EmotionShare, TOP_EMOTIONS};
pub use recency::{recent_feed, take_recent, FeedEntry, RECENT_FEED_LIMIT};
