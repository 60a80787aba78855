//! Filter predicate: does a game satisfy every active criterion?

use std::collections::BTreeSet;

use crate::filter_state::FilterState;
use crate::models::{EntityRef, Game};

/// A filter state prepared for repeated evaluation.
///
/// Holds nothing but borrowed selections and the lower-cased query, so building
/// one per render is cheap.
pub struct Matcher<'s> {
    state: &'s FilterState,
    query: String,
}

impl<'s> Matcher<'s> {
    pub fn new(state: &'s FilterState) -> Self {
        Self {
            state,
            query: state.query.trim().to_lowercase(),
        }
    }

    pub fn matches(&self, game: &Game) -> bool {
        let s = self.state;

        if !self.query.is_empty() && !matches_text(game, &self.query) {
            return false;
        }
        if !intersects(&s.categories, &game.categories) {
            return false;
        }
        if !intersects(&s.mechanics, &game.mechanics) {
            return false;
        }
        if !s.players.accepts(game) {
            return false;
        }
        if !s.weight.is_empty() {
            match game.complexity() {
                Some(c) if s.weight.contains(c.name()) => {}
                _ => return false,
            }
        }
        if !s.playing_time.is_empty() && !contains_opt(&s.playing_time, game.playing_time.as_deref()) {
            return false;
        }
        if !intersects(&s.previous_players, &game.previous_players) {
            return false;
        }
        // A game without a minimum age behaves like age 0, and without plays like 0 plays.
        if let Some(range) = s.min_age {
            if !range.contains(game.min_age.unwrap_or(0)) {
                return false;
            }
        }
        if let Some(range) = s.numplays {
            if !range.contains(game.numplays.unwrap_or(0)) {
                return false;
            }
        }
        if !intersects_names(&s.publishers, &game.publishers) {
            return false;
        }
        if !intersects_names(&s.designers, &game.designers) {
            return false;
        }
        if !intersects_names(&s.artists, &game.artists) {
            return false;
        }
        if !s.years.is_empty() {
            match game.year {
                Some(year) if s.years.contains(&year.to_string()) => {}
                _ => return false,
            }
        }
        if !intersects(&s.status, &game.tags) {
            return false;
        }
        if !s.wishlist.is_empty() && !contains_opt(&s.wishlist, game.wishlist_priority.as_deref()) {
            return false;
        }
        if let Some(range) = s.age {
            if !range.contains(game.min_age.unwrap_or(0)) {
                return false;
            }
        }
        true
    }

    pub fn filter<'a, I>(&self, games: I) -> Vec<&'a Game>
    where
        I: IntoIterator<Item = &'a Game>,
    {
        games.into_iter().filter(|g| self.matches(g)).collect()
    }
}

/// Case-insensitive substring search over the name, description, alternate
/// names and the names of linked families, expansions, accessories and
/// reimplementations. `query` must already be lower-cased.
fn matches_text(game: &Game, query: &str) -> bool {
    let hit = |text: &str| text.to_lowercase().contains(query);
    hit(&game.name)
        || hit(&game.description)
        || game.alternate_names.iter().any(|n| hit(n))
        || game.linked_names().any(hit)
}

/// Empty selection passes; otherwise any shared value passes.
fn intersects(selected: &BTreeSet<String>, values: &[String]) -> bool {
    selected.is_empty() || values.iter().any(|v| selected.contains(v))
}

fn intersects_names(selected: &BTreeSet<String>, refs: &[EntityRef]) -> bool {
    selected.is_empty() || refs.iter().any(|r| selected.contains(&r.name))
}

fn contains_opt(selected: &BTreeSet<String>, value: Option<&str>) -> bool {
    value.is_some_and(|v| selected.contains(v))
}

pub fn matches(game: &Game, state: &FilterState) -> bool {
    Matcher::new(state).matches(game)
}

/// Games satisfying `state`, in input order. Inputs are not modified.
pub fn filter_games<'a, I>(games: I, state: &FilterState) -> Vec<&'a Game>
where
    I: IntoIterator<Item = &'a Game>,
{
    Matcher::new(state).filter(games)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter_state::{NumericRange, PlayerChoice};
    use crate::models::PlayerSuggestion;

    fn game(id: i64, name: &str) -> Game {
        Game {
            id,
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn default_state_matches_everything() {
        let games = vec![game(1, "A"), game(2, "B")];
        assert_eq!(filter_games(&games, &FilterState::default()).len(), 2);
    }

    #[test]
    fn query_matches_name_or_description_case_insensitively() {
        let mut g = game(1, "Brass: Birmingham");
        g.description = "An economic strategy game".into();
        let state = FilterState { query: "birmingham".into(), ..Default::default() };
        assert!(matches(&g, &state));
        let state = FilterState { query: "ECONOMIC".into(), ..Default::default() };
        assert!(matches(&g, &state));
        let state = FilterState { query: "trains".into(), ..Default::default() };
        assert!(!matches(&g, &state));
    }

    #[test]
    fn query_matches_linked_names() {
        let mut g = game(1, "Carcassonne");
        g.expansions.push(EntityRef::new(1, "Inns & Cathedrals"));
        g.alternate_names.push("Carcasona".into());
        assert!(matches(&g, &FilterState { query: "cathedrals".into(), ..Default::default() }));
        assert!(matches(&g, &FilterState { query: "carcasona".into(), ..Default::default() }));
        assert!(!matches(&g, &FilterState { query: "traders".into(), ..Default::default() }));
    }

    #[test]
    fn checkbox_facets_use_or_semantics() {
        let mut g = game(1, "A");
        g.categories = vec!["Party".into()];
        let state = FilterState { categories: set(&["Strategy", "Party"]), ..Default::default() };
        assert!(matches(&g, &state));
        let state = FilterState { categories: set(&["Strategy"]), ..Default::default() };
        assert!(!matches(&g, &state));
    }

    #[test]
    fn weight_uses_complexity_names() {
        let mut g = game(1, "A");
        g.weight = Some(2.5);
        assert!(matches(&g, &FilterState { weight: set(&["Medium"]), ..Default::default() }));
        assert!(!matches(&g, &FilterState { weight: set(&["Light Medium"]), ..Default::default() }));
        g.weight = Some(0.0);
        assert!(!matches(&g, &FilterState { weight: set(&["Light"]), ..Default::default() }));
    }

    #[test]
    fn entity_facets_match_on_name() {
        let mut g = game(1, "A");
        g.publishers = vec![EntityRef::new(7, "Z-Man Games")];
        g.designers = vec![EntityRef::new(8, "Uwe Rosenberg")];
        assert!(matches(&g, &FilterState { publishers: set(&["Z-Man Games"]), ..Default::default() }));
        assert!(!matches(&g, &FilterState { designers: set(&["Reiner Knizia"]), ..Default::default() }));
    }

    #[test]
    fn year_compares_as_string_and_missing_year_never_matches() {
        let mut g = game(1, "A");
        g.year = Some(2017);
        assert!(matches(&g, &FilterState { years: set(&["2017"]), ..Default::default() }));
        g.year = None;
        assert!(!matches(&g, &FilterState { years: set(&["2017"]), ..Default::default() }));
    }

    #[test]
    fn age_bucket_and_slider_combine_restrictively() {
        let mut g = game(1, "A");
        g.min_age = Some(10);
        let state = FilterState {
            min_age: Some(NumericRange::new(0, 12)),
            age: Some(NumericRange::new(12, 18)),
            ..Default::default()
        };
        assert!(!matches(&g, &state));
        let state = FilterState {
            min_age: Some(NumericRange::new(0, 12)),
            age: Some(NumericRange::new(8, 18)),
            ..Default::default()
        };
        assert!(matches(&g, &state));
    }

    #[test]
    fn missing_numplays_counts_as_unplayed() {
        let g = game(1, "A");
        assert!(matches(&g, &FilterState { numplays: Some(NumericRange::new(0, 0)), ..Default::default() }));
        assert!(!matches(&g, &FilterState { numplays: Some(NumericRange::new(1, 5)), ..Default::default() }));
    }

    #[test]
    fn status_wishlist_and_playing_time() {
        let mut g = game(1, "A");
        g.tags = vec!["own".into(), "want".into()];
        g.wishlist_priority = Some("Must Have".into());
        g.playing_time = Some("1-2h".into());
        let state = FilterState {
            status: set(&["want"]),
            wishlist: set(&["Must Have", "Own"]),
            playing_time: set(&["1-2h"]),
            ..Default::default()
        };
        assert!(matches(&g, &state));
        g.wishlist_priority = None;
        assert!(!matches(&g, &state));
    }

    #[test]
    fn players_filter_checks_pairs() {
        let mut g = game(1, "A");
        g.players = vec![PlayerSuggestion::new("2-4", "recommended")];
        assert!(matches(&g, &FilterState { players: PlayerChoice::Count { count: 3 }, ..Default::default() }));
        assert!(!matches(&g, &FilterState { players: PlayerChoice::Count { count: 5 }, ..Default::default() }));
    }

    #[test]
    fn filtering_is_idempotent_and_order_preserving() {
        let mut games: Vec<Game> = (0..6).map(|i| game(i, &format!("G{}", i))).collect();
        for (i, g) in games.iter_mut().enumerate() {
            g.categories = vec![if i % 2 == 0 { "Even" } else { "Odd" }.to_string()];
        }
        let state = FilterState { categories: set(&["Even"]), ..Default::default() };
        let once = filter_games(&games, &state);
        let twice = filter_games(once.iter().copied(), &state);
        let ids: Vec<i64> = once.iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![0, 2, 4]);
        assert_eq!(twice.iter().map(|g| g.id).collect::<Vec<_>>(), ids);
    }
}
