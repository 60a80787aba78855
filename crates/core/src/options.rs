//! Fixed option lists and labels for the catalog facets

use serde::{Deserialize, Serialize};

use crate::filter_state::NumericRange;

pub const GAMES_PER_PAGE: usize = 60;

pub const COMPLEXITY_THRESHOLDS: [f64; 4] = [1.5, 2.5, 3.5, 4.5];

pub const PLAYING_TIMES: [&str; 6] = ["< 30min", "30min - 1h", "1-2h", "2-3h", "3-4h", "> 4h"];

pub const WISHLIST_NAMES: [&str; 7] = [
    "Must Have",
    "Love to Have",
    "Like to Have",
    "Thinking About It",
    "Don't Buy",
    "Own",
    "PreOrdered",
];

/// Recommendation types offered as player sub-options, in display order
pub const PLAYER_RECOMMENDATIONS: [&str; 3] = ["best", "recommended", "expansion"];

/// Bucket meaning "any age"; selecting it is the same as no constraint
pub const MIN_AGE_ANY: NumericRange = NumericRange::new(0, 100);

/// Bucket meaning "any number of plays"
pub const NUMPLAYS_ANY: NumericRange = NumericRange::new(0, 9999);

pub const MIN_AGE_BUCKETS: [(&str, NumericRange); 8] = [
    ("Any age", MIN_AGE_ANY),
    ("< 5 years", NumericRange::new(0, 4)),
    ("< 7 years", NumericRange::new(0, 6)),
    ("< 9 years", NumericRange::new(0, 8)),
    ("< 11 years", NumericRange::new(0, 10)),
    ("< 13 years", NumericRange::new(0, 12)),
    ("< 15 years", NumericRange::new(0, 14)),
    ("15+", NumericRange::new(15, 100)),
];

pub const NUMPLAYS_BUCKETS: [(&str, NumericRange); 5] = [
    ("Any", NUMPLAYS_ANY),
    ("Unplayed (0)", NumericRange::new(0, 0)),
    ("1-5 plays", NumericRange::new(1, 5)),
    ("6-10 plays", NumericRange::new(6, 10)),
    ("11+ plays", NumericRange::new(11, 9999)),
];

/// Complexity bucket derived from the BGG weight score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Complexity {
    Light,
    LightMedium,
    Medium,
    MediumHeavy,
    Heavy,
}

impl Complexity {
    pub const ALL: [Complexity; 5] = [
        Complexity::Light,
        Complexity::LightMedium,
        Complexity::Medium,
        Complexity::MediumHeavy,
        Complexity::Heavy,
    ];

    /// Bucket for a weight score. Scores `<= 0` and NaN have no bucket.
    ///
    /// Thresholds are strict-less-than, so a boundary value lands in the higher bucket.
    pub fn from_weight(score: f64) -> Option<Self> {
        if score.is_nan() || score <= 0.0 {
            return None;
        }
        let idx = COMPLEXITY_THRESHOLDS
            .iter()
            .position(|&t| score < t)
            .unwrap_or(COMPLEXITY_THRESHOLDS.len());
        Some(Self::ALL[idx])
    }

    pub fn name(&self) -> &'static str {
        match self {
            Complexity::Light => "Light",
            Complexity::LightMedium => "Light Medium",
            Complexity::Medium => "Medium",
            Complexity::MediumHeavy => "Medium Heavy",
            Complexity::Heavy => "Heavy",
        }
    }
}

/// Label shown next to a player sub-option
pub fn recommendation_label(recommendation: &str) -> &'static str {
    match recommendation {
        "best" => "Best with",
        "recommended" => "Recommended with",
        _ => "Expansions allow",
    }
}

pub fn players_label(n: u32) -> String {
    format!("{} player{}", n, if n == 1 { "" } else { "s" })
}
