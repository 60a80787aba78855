//! Board-game records as exported by the collection indexer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::options::Complexity;
use crate::player_range::PlayerRange;

/// Recommendation type that never satisfies a player filter
pub const NOT_RECOMMENDED: &str = "not recommended";

/// Reference to a linked BGG entity (publisher, designer, expansion, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRef {
    #[serde(default)]
    pub id: serde_json::Value,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl EntityRef {
    pub fn new(id: impl Into<serde_json::Value>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image: None,
        }
    }
}

/// One `[count, recommendation]` pair from the `players` column.
///
/// The pair list, not a single number, is the ground truth for player-count matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSuggestion(pub String, pub String);

impl PlayerSuggestion {
    pub fn new(count: impl Into<String>, recommendation: impl Into<String>) -> Self {
        Self(count.into(), recommendation.into())
    }

    pub fn count(&self) -> &str {
        &self.0
    }

    pub fn recommendation(&self) -> &str {
        &self.1
    }

    pub fn range(&self) -> PlayerRange {
        PlayerRange::parse(&self.0)
    }

    pub fn is_recommended(&self) -> bool {
        self.1 != NOT_RECOMMENDED
    }
}

/// A game in the collection. Immutable once loaded.
///
/// Every multi-valued field is an empty vector when there is no data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Game {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    /// `"r, g, b"` accent color picked by the indexer
    #[serde(default)]
    pub color: Option<String>,

    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub min_age: Option<u32>,
    #[serde(default)]
    pub numplays: Option<u32>,
    #[serde(default)]
    pub rank: Option<u32>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub average: Option<f64>,
    #[serde(default)]
    pub usersrated: Option<u64>,
    #[serde(default)]
    pub numowned: Option<u64>,
    #[serde(default)]
    pub year: Option<i32>,
    /// Seconds since the Unix epoch
    #[serde(default)]
    pub last_modified: Option<i64>,
    #[serde(default)]
    pub suggested_age: Option<f64>,

    #[serde(default)]
    pub playing_time: Option<String>,
    #[serde(default)]
    pub wishlist_priority: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub wishlist_comment: Option<String>,
    #[serde(default)]
    pub first_played: Option<String>,
    #[serde(default)]
    pub last_played: Option<String>,
    #[serde(default)]
    pub version_name: Option<String>,
    #[serde(default)]
    pub version_year: Option<i32>,

    #[serde(default)]
    pub players: Vec<PlayerSuggestion>,

    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub mechanics: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub previous_players: Vec<String>,
    #[serde(default)]
    pub alternate_names: Vec<String>,

    #[serde(default)]
    pub publishers: Vec<EntityRef>,
    #[serde(default)]
    pub designers: Vec<EntityRef>,
    #[serde(default)]
    pub artists: Vec<EntityRef>,
    #[serde(default)]
    pub expansions: Vec<EntityRef>,
    #[serde(default)]
    pub accessories: Vec<EntityRef>,
    #[serde(default)]
    pub families: Vec<EntityRef>,
    #[serde(default)]
    pub reimplements: Vec<EntityRef>,
    #[serde(default)]
    pub reimplementedby: Vec<EntityRef>,
    #[serde(default)]
    pub integrates: Vec<EntityRef>,
    #[serde(default)]
    pub contained: Vec<EntityRef>,
    #[serde(default)]
    pub po_exp: Vec<EntityRef>,
    #[serde(default)]
    pub wl_exp: Vec<EntityRef>,
    #[serde(default)]
    pub po_acc: Vec<EntityRef>,
    #[serde(default)]
    pub wl_acc: Vec<EntityRef>,
}

impl Game {
    pub fn complexity(&self) -> Option<Complexity> {
        self.weight.and_then(Complexity::from_weight)
    }

    /// Ranges from every suggestion that is not "not recommended"
    pub fn player_ranges(&self) -> impl Iterator<Item = PlayerRange> + '_ {
        self.players
            .iter()
            .filter(|p| p.is_recommended())
            .map(PlayerSuggestion::range)
    }

    pub fn last_modified_at(&self) -> Option<DateTime<Utc>> {
        self.last_modified
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
    }

    /// Linked-entity lists whose names the free-text search also inspects
    pub fn linked_names(&self) -> impl Iterator<Item = &str> + '_ {
        [
            &self.families,
            &self.contained,
            &self.reimplementedby,
            &self.reimplements,
            &self.integrates,
            &self.expansions,
            &self.wl_exp,
            &self.po_exp,
            &self.accessories,
            &self.wl_acc,
            &self.po_acc,
        ]
        .into_iter()
        .flat_map(|refs| refs.iter().map(|r| r.name.as_str()))
    }

    /// Short player summary such as `"2-4"`, `"3"`, or `"1-7+"`
    pub fn player_summary(&self) -> String {
        if self.players.is_empty() {
            return String::new();
        }
        if self.players.len() == 1 {
            return self.players[0].count().to_string();
        }
        let ranges: Vec<PlayerRange> = self
            .players
            .iter()
            .map(PlayerSuggestion::range)
            .filter(|r| r.min > 0)
            .collect();
        let (Some(min), Some(max)) = (
            ranges.iter().map(|r| r.min).min(),
            ranges.iter().map(|r| r.finite_max()).max(),
        ) else {
            return String::new();
        };
        let open = ranges.iter().any(|r| r.open && r.min == max);
        let suffix = if open { "+" } else { "" };
        if min == max {
            format!("{}{}", min, suffix)
        } else {
            format!("{}-{}{}", min, max, suffix)
        }
    }
}

/// Decode a JSON array of game records, as served by `/api/games`
pub fn load_games_json(json: &str) -> crate::error::Result<Vec<Game>> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_lists_deserialize_empty() {
        let game: Game = serde_json::from_str(r#"{"id": 1, "name": "Azul"}"#).unwrap();
        assert!(game.categories.is_empty());
        assert!(game.players.is_empty());
        assert!(game.publishers.is_empty());
        assert!(game.wl_acc.is_empty());
    }

    #[test]
    fn player_pairs_deserialize_from_arrays() {
        let game: Game = serde_json::from_str(
            r#"{"id": 1, "name": "Azul", "players": [["2-4", "recommended"], ["5", "not recommended"]]}"#,
        )
        .unwrap();
        assert_eq!(game.players[0], PlayerSuggestion::new("2-4", "recommended"));
        assert_eq!(game.player_ranges().count(), 1);
    }

    #[test]
    fn entity_refs_accept_numeric_or_string_ids() {
        let refs: Vec<EntityRef> =
            serde_json::from_str(r#"[{"id": 12, "name": "Z-Man"}, {"id": "x", "name": "Other", "image": "a.png"}]"#)
                .unwrap();
        assert_eq!(refs[0].name, "Z-Man");
        assert_eq!(refs[1].image.as_deref(), Some("a.png"));
    }

    #[test]
    fn player_summary_spans_suggestions() {
        let game = Game {
            players: vec![
                PlayerSuggestion::new("2", "recommended"),
                PlayerSuggestion::new("3", "best"),
                PlayerSuggestion::new("5+", "expansion"),
            ],
            ..Default::default()
        };
        assert_eq!(game.player_summary(), "2-5+");
    }

    #[test]
    fn last_modified_converts_to_datetime() {
        let game = Game { last_modified: Some(0), ..Default::default() };
        assert_eq!(game.last_modified_at().map(|d| d.timestamp()), Some(0));
    }
}
