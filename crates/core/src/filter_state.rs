//! Filter state: one immutable value per evaluation
//!
//! Every user interaction or URL navigation produces a fresh `FilterState`
//! through [`FilterState::apply`]; nothing mutates a state that has already
//! been rendered.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::facets::Facet;
use crate::models::Game;
use crate::options::{MIN_AGE_ANY, NUMPLAYS_ANY};
use crate::sort::SortKey;

/// Inclusive integer range, written `"min-max"` in URLs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NumericRange {
    pub min: u32,
    pub max: u32,
}

impl NumericRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: u32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Parse `"min-max"` with `min <= max`; anything else is `None`.
    pub fn parse(s: &str) -> Option<Self> {
        let (lo, hi) = s.trim().split_once('-')?;
        let min = lo.trim().parse().ok()?;
        let max = hi.trim().parse().ok()?;
        Some(Self { min, max }).filter(NumericRange::is_ordered)
    }

    pub fn is_ordered(&self) -> bool {
        self.min <= self.max
    }

    pub fn covers(&self, other: &NumericRange) -> bool {
        self.min <= other.min && self.max >= other.max
    }
}

impl fmt::Display for NumericRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// Selection of the hierarchical player facet.
///
/// `CountWithType` options are children of the `Count` option with the same count.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PlayerChoice {
    #[default]
    Any,
    Count { count: u32 },
    CountWithType { count: u32, recommendation: String },
}

impl PlayerChoice {
    /// Parse `"any"`, `"N"` or `"N-type"`. Malformed values mean `Any`.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if let Some((count, recommendation)) = value.split_once('-') {
            return match count.trim().parse() {
                Ok(count) if !recommendation.is_empty() => PlayerChoice::CountWithType {
                    count,
                    recommendation: recommendation.to_string(),
                },
                _ => PlayerChoice::Any,
            };
        }
        value
            .parse()
            .map(|count| PlayerChoice::Count { count })
            .unwrap_or(PlayerChoice::Any)
    }

    pub fn value(&self) -> String {
        match self {
            PlayerChoice::Any => "any".to_string(),
            PlayerChoice::Count { count } => count.to_string(),
            PlayerChoice::CountWithType { count, recommendation } => {
                format!("{}-{}", count, recommendation)
            }
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, PlayerChoice::Any)
    }

    /// Count shared by an option and its sub-options
    pub fn count(&self) -> Option<u32> {
        match self {
            PlayerChoice::Any => None,
            PlayerChoice::Count { count } | PlayerChoice::CountWithType { count, .. } => Some(*count),
        }
    }

    /// Parent count of a sub-option
    pub fn parent(&self) -> Option<u32> {
        match self {
            PlayerChoice::CountWithType { count, .. } => Some(*count),
            _ => None,
        }
    }

    pub fn accepts(&self, game: &Game) -> bool {
        let (target, required) = match self {
            PlayerChoice::Any => return true,
            PlayerChoice::Count { count } => (*count, None),
            PlayerChoice::CountWithType { count, recommendation } => (*count, Some(recommendation.as_str())),
        };
        game.players.iter().any(|p| {
            if p.count().is_empty() || !p.is_recommended() {
                return false;
            }
            if required.is_some_and(|r| r != p.recommendation()) {
                return false;
            }
            p.range().accepts(target)
        })
    }

    /// Whether this option is shown given the current selection.
    ///
    /// Top-level options are always shown. A sub-option is shown when its parent
    /// or any sibling sub-option is selected, and never while `Any` is selected.
    pub fn is_visible(&self, selected: &PlayerChoice) -> bool {
        match self.parent() {
            None => true,
            Some(parent) => !selected.is_any() && selected.count() == Some(parent),
        }
    }
}

/// How the browser history should record a state change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryAction {
    /// Replace the current entry (ordinary filter changes, paging)
    Replace,
    /// Push a new entry (clearing every filter)
    Push,
    /// Leave history alone (back/forward navigation already moved it)
    None,
}

/// A user interaction that produces a new filter state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Free-text query changed (already debounced by the caller)
    Search { query: String },
    /// Checkbox facets flip membership of `value`; radio facets switch to `value`
    Toggle { facet: Facet, value: String },
    /// Age slider moved; `None` resets it
    SetAgeRange { range: Option<NumericRange> },
    Sort { key: SortKey },
    GoToPage { page: u32 },
    ClearAll,
    /// Back/forward navigation or an initial load from a query string
    Navigate { query: String },
}

impl Event {
    pub fn history_action(&self) -> HistoryAction {
        match self {
            Event::ClearAll => HistoryAction::Push,
            Event::Navigate { .. } => HistoryAction::None,
            _ => HistoryAction::Replace,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    /// Lower-cased, trimmed free-text query; empty means no constraint
    pub query: String,
    pub categories: BTreeSet<String>,
    pub mechanics: BTreeSet<String>,
    pub players: PlayerChoice,
    pub weight: BTreeSet<String>,
    pub playing_time: BTreeSet<String>,
    pub previous_players: BTreeSet<String>,
    pub min_age: Option<NumericRange>,
    pub numplays: Option<NumericRange>,
    pub publishers: BTreeSet<String>,
    pub designers: BTreeSet<String>,
    pub artists: BTreeSet<String>,
    pub years: BTreeSet<String>,
    pub status: BTreeSet<String>,
    pub wishlist: BTreeSet<String>,
    pub age: Option<NumericRange>,
    pub sort: SortKey,
    /// 1-based
    pub page: u32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            query: String::new(),
            categories: BTreeSet::new(),
            mechanics: BTreeSet::new(),
            players: PlayerChoice::Any,
            weight: BTreeSet::new(),
            playing_time: BTreeSet::new(),
            previous_players: BTreeSet::new(),
            min_age: None,
            numplays: None,
            publishers: BTreeSet::new(),
            designers: BTreeSet::new(),
            artists: BTreeSet::new(),
            years: BTreeSet::new(),
            status: BTreeSet::new(),
            wishlist: BTreeSet::new(),
            age: None,
            sort: SortKey::Name,
            page: 1,
        }
    }
}

pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

impl FilterState {
    /// Checkbox-style selection for `facet`, `None` for radio and slider facets
    pub fn selection(&self, facet: Facet) -> Option<&BTreeSet<String>> {
        Some(match facet {
            Facet::Categories => &self.categories,
            Facet::Mechanics => &self.mechanics,
            Facet::Weight => &self.weight,
            Facet::PlayingTime => &self.playing_time,
            Facet::PreviousPlayers => &self.previous_players,
            Facet::Publishers => &self.publishers,
            Facet::Designers => &self.designers,
            Facet::Artists => &self.artists,
            Facet::Years => &self.years,
            Facet::Status => &self.status,
            Facet::Wishlist => &self.wishlist,
            Facet::Players | Facet::MinAge | Facet::NumPlays | Facet::AgeRange => return None,
        })
    }

    pub fn selection_mut(&mut self, facet: Facet) -> Option<&mut BTreeSet<String>> {
        Some(match facet {
            Facet::Categories => &mut self.categories,
            Facet::Mechanics => &mut self.mechanics,
            Facet::Weight => &mut self.weight,
            Facet::PlayingTime => &mut self.playing_time,
            Facet::PreviousPlayers => &mut self.previous_players,
            Facet::Publishers => &mut self.publishers,
            Facet::Designers => &mut self.designers,
            Facet::Artists => &mut self.artists,
            Facet::Years => &mut self.years,
            Facet::Status => &mut self.status,
            Facet::Wishlist => &mut self.wishlist,
            Facet::Players | Facet::MinAge | Facet::NumPlays | Facet::AgeRange => return None,
        })
    }

    /// Whether `facet` currently constrains the result set
    pub fn is_active(&self, facet: Facet) -> bool {
        match facet {
            Facet::Players => !self.players.is_any(),
            Facet::MinAge => self.min_age.is_some(),
            Facet::NumPlays => self.numplays.is_some(),
            Facet::AgeRange => self.age.is_some(),
            _ => self.selection(facet).is_some_and(|s| !s.is_empty()),
        }
    }

    pub fn any_filter_active(&self) -> bool {
        !self.query.is_empty() || Facet::ALL.iter().any(|&f| self.is_active(f))
    }

    /// Copy of this state with `facet` cleared to "unconstrained"
    pub fn without(&self, facet: Facet) -> FilterState {
        let mut next = self.clone();
        match facet {
            Facet::Players => next.players = PlayerChoice::Any,
            Facet::MinAge => next.min_age = None,
            Facet::NumPlays => next.numplays = None,
            Facet::AgeRange => next.age = None,
            _ => {
                if let Some(set) = next.selection_mut(facet) {
                    set.clear();
                }
            }
        }
        next
    }

    /// Collapse every spelling of "no constraint" to the canonical default.
    pub fn normalized(mut self) -> FilterState {
        self.query = normalize_query(&self.query);
        for facet in Facet::ALL {
            if let Some(set) = self.selection_mut(facet) {
                set.retain(|v| !v.is_empty());
            }
        }
        // An inverted range has no URL form, so it cannot survive as a constraint.
        self.min_age = self.min_age.filter(|r| r.is_ordered() && *r != MIN_AGE_ANY);
        self.numplays = self.numplays.filter(|r| r.is_ordered() && *r != NUMPLAYS_ANY);
        self.age = self.age.filter(NumericRange::is_ordered);
        self.page = self.page.max(1);
        self
    }

    /// Drop an age-slider range that spans the whole catalog.
    pub fn with_age_bounds(mut self, bounds: Option<NumericRange>) -> FilterState {
        if let (Some(age), Some(bounds)) = (self.age, bounds) {
            if age.covers(&bounds) {
                self.age = None;
            }
        }
        self
    }

    /// Produce the state that follows `event`. Filter changes return to page 1.
    pub fn apply(&self, event: &Event) -> FilterState {
        let mut next = self.clone();
        match event {
            Event::Search { query } => next.query = normalize_query(query),
            Event::Toggle { facet, value } => match facet {
                Facet::Players => next.players = PlayerChoice::parse(value),
                Facet::MinAge => next.min_age = NumericRange::parse(value),
                Facet::NumPlays => next.numplays = NumericRange::parse(value),
                Facet::AgeRange => next.age = NumericRange::parse(value),
                _ => {
                    if let Some(set) = next.selection_mut(*facet) {
                        if !set.remove(value) {
                            set.insert(value.clone());
                        }
                    }
                }
            },
            Event::SetAgeRange { range } => next.age = *range,
            Event::Sort { key } => next.sort = *key,
            Event::GoToPage { page } => {
                next.page = (*page).max(1);
                return next;
            }
            Event::ClearAll => return FilterState::default(),
            Event::Navigate { query } => return crate::url_state::decode(query),
        }
        next.page = 1;
        next.normalized()
    }
}
