//! Formatting helpers shared across report outputs.
//!
//! Confidence values are taken as-is by default: a detector that reports
//! `1.3` renders as `130%`. [`ConfidencePolicy::Clamp`] bounds them to
//! `0.0..=1.0` first. The source record is never touched either way.

/// How out-of-range confidence values are treated before display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfidencePolicy {
    /// Render exactly what the detector reported
    #[default]
    Faithful,
    /// Clamp into `0.0..=1.0`
    Clamp,
}

impl ConfidencePolicy {
    pub fn from_clamp_flag(clamp: bool) -> Self {
        if clamp {
            ConfidencePolicy::Clamp
        } else {
            ConfidencePolicy::Faithful
        }
    }

    /// Apply the policy to a raw confidence.
    pub fn apply(&self, confidence: f64) -> f64 {
        match self {
            ConfidencePolicy::Faithful => confidence,
            ConfidencePolicy::Clamp if confidence.is_nan() => 0.0,
            ConfidencePolicy::Clamp => confidence.clamp(0.0, 1.0),
        }
    }
}

/// Round half up (`2.5 -> 3`, `-2.5 -> -2`).
///
/// Compares the exact fractional part, so values just below a half
/// (e.g. `0.49999999999999994`) still round down.
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Share of `count` in `total` as a whole percentage.
///
/// Returns `None` when `total` is zero.
pub fn percentage(count: usize, total: usize) -> Option<i64> {
    if total == 0 {
        return None;
    }
    Some(round_half_up(count as f64 / total as f64 * 100.0) as i64)
}

/// Confidence as a whole percentage (e.g., `0.874 -> 87`).
///
/// Non-finite input renders as 0.
pub fn confidence_percent(confidence: f64) -> i64 {
    let pct = round_half_up(confidence * 100.0);
    if pct.is_finite() {
        pct as i64
    } else {
        0
    }
}

/// Progress-bar width as a CSS-style percentage string (e.g., `"90%"`).
///
/// Uses the shortest float representation, so `0.57` yields
/// `"56.99999999999999%"` just like the arithmetic says.
pub fn bar_width(confidence: f64) -> String {
    format!("{}%", confidence * 100.0)
}
