//! Emotion category presentation.
//!
//! Static icon and gradient table for the recognized categories, with one
//! fallback pair for everything else.

use serde::Serialize;

use crate::types::Emotion;

/// Icon identifier and two-stop gradient for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Presentation {
    /// Icon name (lucide identifiers)
    pub icon: &'static str,
    /// Gradient start and end color tokens
    pub colors: (&'static str, &'static str),
}

impl Presentation {
    /// Fallback for categories outside the table.
    pub const FALLBACK: Presentation = Presentation {
        icon: "meh",
        colors: ("gray-400", "gray-500"),
    };

    /// Gradient as a class string (e.g., "from-green-400 to-green-600").
    pub fn gradient_class(&self) -> String {
        format!("from-{} to-{}", self.colors.0, self.colors.1)
    }
}

/// Look up the presentation for a category.
pub fn presentation_for(emotion: &Emotion) -> Presentation {
    match emotion {
        Emotion::Happy => Presentation {
            icon: "smile",
            colors: ("green-400", "green-600"),
        },
        Emotion::Sad => Presentation {
            icon: "frown",
            colors: ("blue-400", "blue-600"),
        },
        Emotion::Neutral => Presentation {
            icon: "meh",
            colors: ("gray-400", "gray-600"),
        },
        Emotion::Surprised => Presentation {
            icon: "alert-circle",
            colors: ("yellow-400", "yellow-600"),
        },
        Emotion::Angry => Presentation {
            icon: "alert-circle",
            colors: ("red-400", "red-600"),
        },
        Emotion::Fear => Presentation {
            icon: "alert-circle",
            colors: ("purple-400", "purple-600"),
        },
        Emotion::Other(_) => Presentation::FALLBACK,
    }
}
