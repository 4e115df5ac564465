//! Emotion frequency ranking.
//!
//! Counts categories in one pass and keeps the K most frequent. Ties keep
//! the order in which categories first appeared in the input, so the same
//! history always ranks the same way.

use serde::Serialize;
use std::collections::HashMap;

use crate::format::percentage;
use crate::presentation::{presentation_for, Presentation};
use crate::types::{Emotion, EmotionRecord};

/// Number of categories shown in the insights panel.
pub const TOP_EMOTIONS: usize = 3;

/// One ranked category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmotionShare {
    /// Category
    pub emotion: Emotion,
    /// Number of detections with this category
    pub count: usize,
    /// Share of the whole history, rounded half up
    pub percentage: i64,
    /// Icon and gradient for display
    pub presentation: Presentation,
}

/// Count detections per category, in order of first appearance.
pub fn count_emotions(history: &[EmotionRecord]) -> Vec<(Emotion, usize)> {
    let mut index: HashMap<&Emotion, usize> = HashMap::new();
    let mut counts: Vec<(Emotion, usize)> = Vec::new();

    for record in history {
        match index.get(&record.emotion) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(&record.emotion, counts.len());
                counts.push((record.emotion.clone(), 1));
            }
        }
    }

    counts
}

/// Rank categories by count descending and keep the first `limit`.
///
/// Percentages are relative to the full history length, not to the sum of
/// the kept counts. An empty history yields an empty ranking.
pub fn rank_emotions(history: &[EmotionRecord], limit: usize) -> Vec<EmotionShare> {
    let total = history.len();
    let mut counts = count_emotions(history);

    // Stable: equal counts stay in first-appearance order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(limit);

    counts
        .into_iter()
        .filter_map(|(emotion, count)| {
            let pct = percentage(count, total)?;
            Some(EmotionShare {
                presentation: presentation_for(&emotion),
                emotion,
                count,
                percentage: pct,
            })
        })
        .collect()
}

/// The three most frequent categories.
pub fn top_emotions(history: &[EmotionRecord]) -> Vec<EmotionShare> {
    rank_emotions(history, TOP_EMOTIONS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(labels: &[&str]) -> Vec<EmotionRecord> {
        labels
            .iter()
            .enumerate()
            .map(|(i, label)| {
                EmotionRecord::new(i.to_string(), *label, 0.5, "2024-03-01T09:00:00Z")
            })
            .collect()
    }

    fn ranked(shares: &[EmotionShare]) -> Vec<(&str, usize, i64)> {
        shares
            .iter()
            .map(|s| (s.emotion.as_str(), s.count, s.percentage))
            .collect()
    }

    #[test]
    fn test_empty_history() {
        assert!(top_emotions(&[]).is_empty());
        assert!(count_emotions(&[]).is_empty());
    }

    #[test]
    fn test_counts_in_first_appearance_order() {
        let counts = count_emotions(&history(&["sad", "happy", "sad", "fear"]));
        assert_eq!(
            counts,
            vec![
                (Emotion::Sad, 2),
                (Emotion::Happy, 1),
                (Emotion::Fear, 1)
            ]
        );
    }

    #[test]
    fn test_top_three_with_percentages() {
        let shares = top_emotions(&history(&["happy", "happy", "sad"]));
        assert_eq!(ranked(&shares), vec![("happy", 2, 67), ("sad", 1, 33)]);
        assert_eq!(shares[0].presentation.icon, "smile");
    }

    #[test]
    fn test_ties_keep_first_appearance() {
        // fear reaches 2 before angry does, but angry appeared first
        let shares = top_emotions(&history(&["angry", "fear", "fear", "angry"]));
        assert_eq!(ranked(&shares), vec![("angry", 2, 50), ("fear", 2, 50)]);

        let shares = top_emotions(&history(&["neutral", "sad", "happy", "fear", "happy"]));
        assert_eq!(
            ranked(&shares),
            vec![("happy", 2, 40), ("neutral", 1, 20), ("sad", 1, 20)]
        );
    }

    #[test]
    fn test_percentage_uses_full_history() {
        let shares = top_emotions(&history(&[
            "happy", "sad", "neutral", "fear", "angry", "surprised", "happy", "sad",
        ]));
        assert_eq!(shares.len(), 3);
        let kept: usize = shares.iter().map(|s| s.count).sum();
        assert!(kept <= 8);
        assert_eq!(shares[0].percentage, 25);
        assert_eq!(shares[2].percentage, 13);
    }

    #[test]
    fn test_unknown_categories_are_counted() {
        let shares = top_emotions(&history(&["disgust", "disgust", "happy"]));
        assert_eq!(shares[0].emotion, Emotion::Other("disgust".to_string()));
        assert_eq!(shares[0].presentation, Presentation::FALLBACK);
    }

    #[test]
    fn test_custom_limit() {
        let records = history(&["happy", "sad", "fear", "angry"]);
        assert_eq!(rank_emotions(&records, 1).len(), 1);
        assert_eq!(rank_emotions(&records, 10).len(), 4);
        assert!(rank_emotions(&records, 0).is_empty());
    }
}
