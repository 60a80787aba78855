//! Result ordering

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::models::Game;

/// Rank used for unranked games so they sort after every ranked one
const UNRANKED: u32 = 999_999;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    Rank,
    Rating,
    NumOwned,
    NumRated,
    LastMod,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::Name,
        SortKey::Rank,
        SortKey::Rating,
        SortKey::NumOwned,
        SortKey::NumRated,
        SortKey::LastMod,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Rank => "rank",
            SortKey::Rating => "rating",
            SortKey::NumOwned => "numowned",
            SortKey::NumRated => "numrated",
            SortKey::LastMod => "lastmod",
        }
    }

    /// Unknown keys fall back to `Name`.
    pub fn parse(s: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .unwrap_or_default()
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Name => "Name (A-Z)",
            SortKey::Rank => "BGG Rank",
            SortKey::Rating => "Rating",
            SortKey::NumOwned => "Most Owned",
            SortKey::NumRated => "Most Rated",
            SortKey::LastMod => "Last Modified",
        }
    }

    pub fn compare(&self, a: &Game, b: &Game) -> Ordering {
        match self {
            SortKey::Name => compare_names(&a.name, &b.name),
            SortKey::Rank => rank_of(a).cmp(&rank_of(b)),
            SortKey::Rating => desc_f64(a.rating, b.rating),
            SortKey::NumOwned => b.numowned.unwrap_or(0).cmp(&a.numowned.unwrap_or(0)),
            SortKey::NumRated => b.usersrated.unwrap_or(0).cmp(&a.usersrated.unwrap_or(0)),
            SortKey::LastMod => b.last_modified.unwrap_or(0).cmp(&a.last_modified.unwrap_or(0)),
        }
    }
}

fn rank_of(game: &Game) -> u32 {
    game.rank.filter(|&r| r > 0).unwrap_or(UNRANKED)
}

fn desc_f64(a: Option<f64>, b: Option<f64>) -> Ordering {
    let a = a.unwrap_or(0.0);
    let b = b.unwrap_or(0.0);
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Collation key for titles: accents and case are ignored first, then
/// accents break ties (unaccented first), then the raw bytes.
fn name_key(name: &str) -> (String, String, String) {
    let lower = name.to_lowercase();
    let folded = lower.nfd().filter(|c| !is_combining_mark(*c)).collect();
    let accented = lower.nfd().collect();
    (folded, accented, name.to_string())
}

fn compare_names(a: &str, b: &str) -> Ordering {
    name_key(a).cmp(&name_key(b))
}

/// Sorted copy of `games`. The sort is stable, so ties keep their input order.
pub fn sort_games<'a>(games: &[&'a Game], key: SortKey) -> Vec<&'a Game> {
    let mut sorted = games.to_vec();
    match key {
        // Stable too; builds each collation key once instead of per comparison.
        SortKey::Name => sorted.sort_by_cached_key(|g| name_key(&g.name)),
        _ => sorted.sort_by(|a, b| key.compare(a, b)),
    }
    sorted
}
