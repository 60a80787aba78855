//! Facet option lists and leave-one-out counts
//!
//! A facet's counts are computed with that facet's own selection cleared and
//! every other active filter applied. Selected options therefore keep showing
//! the count they would contribute on their own, and unselected options show
//! how many records toggling them would add.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::filter::filter_games;
use crate::filter_state::{FilterState, NumericRange, PlayerChoice};
use crate::models::{EntityRef, Game};
use crate::options::{
    players_label, recommendation_label, Complexity, MIN_AGE_ANY, MIN_AGE_BUCKETS, NUMPLAYS_ANY,
    NUMPLAYS_BUCKETS, PLAYER_RECOMMENDATIONS, PLAYING_TIMES, WISHLIST_NAMES,
};

/// Option value used for the single age-slider entry
pub const AGE_RANGE_VALUE: &str = "range";

pub type FacetCounts = BTreeMap<String, usize>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facet {
    Categories,
    Mechanics,
    Players,
    Weight,
    PlayingTime,
    PreviousPlayers,
    MinAge,
    NumPlays,
    Publishers,
    Designers,
    Artists,
    Years,
    Status,
    Wishlist,
    AgeRange,
}

/// How a facet's widget selects values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacetKind {
    Checkbox,
    Radio,
    Slider,
}

impl Facet {
    pub const ALL: [Facet; 15] = [
        Facet::Categories,
        Facet::Mechanics,
        Facet::Players,
        Facet::Weight,
        Facet::PlayingTime,
        Facet::PreviousPlayers,
        Facet::MinAge,
        Facet::NumPlays,
        Facet::Publishers,
        Facet::Designers,
        Facet::Artists,
        Facet::Years,
        Facet::Status,
        Facet::Wishlist,
        Facet::AgeRange,
    ];

    /// Query-string parameter holding this facet's selection
    pub fn url_key(&self) -> &'static str {
        match self {
            Facet::Categories => "categories",
            Facet::Mechanics => "mechanics",
            Facet::Players => "players",
            Facet::Weight => "weight",
            Facet::PlayingTime => "playing_time",
            Facet::PreviousPlayers => "previous_players",
            Facet::MinAge => "min_age",
            Facet::NumPlays => "numplays",
            Facet::Publishers => "publishers",
            Facet::Designers => "designers",
            Facet::Artists => "artists",
            Facet::Years => "years",
            Facet::Status => "status",
            Facet::Wishlist => "wishlist",
            Facet::AgeRange => "age",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Facet::Categories => "Categories",
            Facet::Mechanics => "Mechanics",
            Facet::Players => "Number of players",
            Facet::Weight => "Complexity",
            Facet::PlayingTime => "Playing time",
            Facet::PreviousPlayers => "Previous players",
            Facet::MinAge => "Min age",
            Facet::NumPlays => "Number of plays",
            Facet::Publishers => "Publishers",
            Facet::Designers => "Designers",
            Facet::Artists => "Artists",
            Facet::Years => "Year",
            Facet::Status => "Status",
            Facet::Wishlist => "Wishlist",
            Facet::AgeRange => "Age range",
        }
    }

    pub fn kind(&self) -> FacetKind {
        match self {
            Facet::Players | Facet::MinAge | Facet::NumPlays => FacetKind::Radio,
            Facet::AgeRange => FacetKind::Slider,
            _ => FacetKind::Checkbox,
        }
    }

    /// Distinct raw values `game` carries for a checkbox facet
    fn values<'g>(&self, game: &'g Game) -> BTreeSet<&'g str> {
        let strings = |v: &'g [String]| -> BTreeSet<&'g str> { v.iter().map(String::as_str).collect() };
        let names = |v: &'g [EntityRef]| -> BTreeSet<&'g str> { v.iter().map(|r| r.name.as_str()).collect() };
        let single = |v: Option<&'g str>| -> BTreeSet<&'g str> { v.filter(|s| !s.is_empty()).into_iter().collect() };
        match self {
            Facet::Categories => strings(&game.categories),
            Facet::Mechanics => strings(&game.mechanics),
            Facet::PreviousPlayers => strings(&game.previous_players),
            Facet::Status => strings(&game.tags),
            Facet::Publishers => names(&game.publishers),
            Facet::Designers => names(&game.designers),
            Facet::Artists => names(&game.artists),
            Facet::Weight => game.complexity().map(|c| c.name()).into_iter().collect(),
            Facet::PlayingTime => single(game.playing_time.as_deref()),
            Facet::Wishlist => single(game.wishlist_priority.as_deref()),
            Facet::Years | Facet::Players | Facet::MinAge | Facet::NumPlays | Facet::AgeRange => {
                BTreeSet::new()
            }
        }
    }
}

/// One selectable entry of a facet widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetOption {
    pub value: String,
    pub label: String,
    /// 0 for top-level options, 1 for player sub-options
    pub level: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

impl FacetOption {
    fn plain(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
            level: 0,
            parent: None,
        }
    }

    fn labelled(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            level: 0,
            parent: None,
        }
    }
}

/// Widest closed range expanded into individual player options
pub const MAX_PLAYER_SPAN: u32 = 100;

/// Every player count any game supports, ascending.
///
/// Ranges are expanded; an open range contributes only its minimum. A range
/// wider than [`MAX_PLAYER_SPAN`] contributes only its minimum too.
pub fn supported_player_counts(games: &[Game]) -> Vec<u32> {
    let mut counts = BTreeSet::new();
    for game in games {
        for range in game.player_ranges() {
            if range.min == 0 {
                continue;
            }
            let max = range.finite_max();
            if max.saturating_sub(range.min) > MAX_PLAYER_SPAN {
                warn!(game_id = game.id, min = range.min, max, "Player range too wide, listing its minimum only");
                counts.insert(range.min);
            } else {
                counts.extend(range.min..=max);
            }
        }
    }
    counts.into_iter().collect()
}

fn player_options(games: &[Game]) -> Vec<FacetOption> {
    let mut options = vec![FacetOption::labelled("any", "Any")];
    for n in supported_player_counts(games) {
        options.push(FacetOption::labelled(n.to_string(), players_label(n)));
        for recommendation in PLAYER_RECOMMENDATIONS {
            let choice = PlayerChoice::CountWithType {
                count: n,
                recommendation: recommendation.to_string(),
            };
            if games.iter().any(|g| choice.accepts(g)) {
                options.push(FacetOption {
                    value: choice.value(),
                    label: format!("{} {}", recommendation_label(recommendation), players_label(n)),
                    level: 1,
                    parent: Some(n.to_string()),
                });
            }
        }
    }
    options
}

/// Options offered by `facet`, derived from the full catalog
pub fn facet_options(facet: Facet, games: &[Game]) -> Vec<FacetOption> {
    match facet {
        Facet::Players => player_options(games),
        Facet::Weight => Complexity::ALL.iter().map(|c| FacetOption::plain(c.name())).collect(),
        Facet::PlayingTime => PLAYING_TIMES.iter().map(|t| FacetOption::plain(*t)).collect(),
        Facet::Wishlist => WISHLIST_NAMES.iter().map(|w| FacetOption::plain(*w)).collect(),
        Facet::MinAge => MIN_AGE_BUCKETS
            .iter()
            .map(|(label, range)| FacetOption::labelled(range.to_string(), *label))
            .collect(),
        Facet::NumPlays => NUMPLAYS_BUCKETS
            .iter()
            .map(|(label, range)| FacetOption::labelled(range.to_string(), *label))
            .collect(),
        Facet::AgeRange => vec![FacetOption::labelled(AGE_RANGE_VALUE, "Min age")],
        Facet::Years => {
            let years: BTreeSet<i32> = games.iter().filter_map(|g| g.year).collect();
            years.into_iter().rev().map(|y| FacetOption::plain(y.to_string())).collect()
        }
        _ => {
            let values: BTreeSet<&str> = games.iter().flat_map(|g| facet.values(g)).collect();
            values.into_iter().map(FacetOption::plain).collect()
        }
    }
}

/// Leave-one-out counts for `facet`
pub fn counts_for(facet: Facet, games: &[Game], state: &FilterState) -> FacetCounts {
    let options = match facet.kind() {
        FacetKind::Checkbox => Vec::new(),
        _ => facet_options(facet, games),
    };
    counts_with_options(facet, games, &options, state)
}

/// Leave-one-out counts for `facet`, using precomputed radio options
pub fn counts_with_options(
    facet: Facet,
    games: &[Game],
    options: &[FacetOption],
    state: &FilterState,
) -> FacetCounts {
    let neutral = state.without(facet);
    let subset = filter_games(games, &neutral);
    let mut counts = FacetCounts::new();

    match facet {
        Facet::Players => {
            for option in options {
                let choice = PlayerChoice::parse(&option.value);
                let count = subset.iter().filter(|g| choice.accepts(g)).count();
                counts.insert(option.value.clone(), count);
            }
        }
        Facet::MinAge | Facet::NumPlays => {
            let any = if facet == Facet::MinAge { MIN_AGE_ANY } else { NUMPLAYS_ANY };
            for option in options {
                let count = match NumericRange::parse(&option.value) {
                    Some(range) if range == any => subset.len(),
                    Some(range) => subset
                        .iter()
                        .filter(|g| {
                            let v = if facet == Facet::MinAge { g.min_age } else { g.numplays };
                            range.contains(v.unwrap_or(0))
                        })
                        .count(),
                    None => 0,
                };
                counts.insert(option.value.clone(), count);
            }
        }
        Facet::AgeRange => {
            let count = match state.age {
                Some(range) => subset.iter().filter(|g| range.contains(g.min_age.unwrap_or(0))).count(),
                None => subset.len(),
            };
            counts.insert(AGE_RANGE_VALUE.to_string(), count);
        }
        Facet::Years => {
            for game in &subset {
                if let Some(year) = game.year {
                    *counts.entry(year.to_string()).or_insert(0) += 1;
                }
            }
        }
        _ => {
            for game in &subset {
                for value in facet.values(game) {
                    *counts.entry(value.to_string()).or_insert(0) += 1;
                }
            }
        }
    }
    counts
}

/// Counts for every facet
pub fn all_counts(games: &[Game], state: &FilterState) -> BTreeMap<Facet, FacetCounts> {
    Facet::ALL
        .iter()
        .map(|&facet| (facet, counts_for(facet, games, state)))
        .collect()
}

/// Render-ready state of one option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionView {
    pub value: String,
    pub label: String,
    pub level: u8,
    pub count: usize,
    pub selected: bool,
    pub visible: bool,
}

/// Render-ready state of one facet widget
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacetView {
    pub facet: Facet,
    pub key: &'static str,
    pub title: &'static str,
    pub kind: FacetKind,
    /// Highlight the widget: this facet constrains the results
    pub active: bool,
    pub options: Vec<OptionView>,
}

fn is_selected(facet: Facet, state: &FilterState, value: &str) -> bool {
    match facet {
        Facet::Players => state.players.value() == value,
        Facet::MinAge => state.min_age.unwrap_or(MIN_AGE_ANY).to_string() == value,
        Facet::NumPlays => state.numplays.unwrap_or(NUMPLAYS_ANY).to_string() == value,
        Facet::AgeRange => state.age.is_some(),
        _ => state.selection(facet).is_some_and(|s| s.contains(value)),
    }
}

/// The active radio selection as an option, so it can be shown even when the
/// catalog does not list it
fn unlisted_radio_selection(facet: Facet, state: &FilterState) -> Option<FacetOption> {
    let range_option = |range: Option<NumericRange>| range.map(|r| FacetOption::plain(r.to_string()));
    match facet {
        Facet::Players => match &state.players {
            PlayerChoice::Any => None,
            PlayerChoice::Count { count } => Some(FacetOption::labelled(count.to_string(), players_label(*count))),
            choice @ PlayerChoice::CountWithType { count, recommendation } => Some(FacetOption {
                value: choice.value(),
                label: format!("{} {}", recommendation_label(recommendation), players_label(*count)),
                level: 1,
                parent: Some(count.to_string()),
            }),
        },
        Facet::MinAge => range_option(state.min_age),
        Facet::NumPlays => range_option(state.numplays),
        _ => None,
    }
}

/// Build the widget state for `facet`
pub fn facet_view(
    facet: Facet,
    games: &[Game],
    options: &[FacetOption],
    state: &FilterState,
) -> FacetView {
    let mut options: Vec<FacetOption> = options.to_vec();
    // Values can be selected through a URL even when the catalog never offers them.
    if let Some(selection) = state.selection(facet) {
        for value in selection {
            if !options.iter().any(|o| &o.value == value) {
                options.push(FacetOption::plain(value.clone()));
            }
        }
    } else if let Some(extra) = unlisted_radio_selection(facet, state) {
        if !options.iter().any(|o| o.value == extra.value) {
            options.push(extra);
        }
    }
    let counts = counts_with_options(facet, games, &options, state);

    let options = options
        .into_iter()
        .map(|option| {
            let count = counts.get(&option.value).copied().unwrap_or(0);
            let selected = is_selected(facet, state, &option.value);
            let visible = match facet.kind() {
                FacetKind::Checkbox => count > 0 || selected,
                FacetKind::Slider => true,
                FacetKind::Radio if facet == Facet::Players => {
                    PlayerChoice::parse(&option.value).is_visible(&state.players)
                }
                FacetKind::Radio => true,
            };
            OptionView {
                value: option.value,
                label: option.label,
                level: option.level,
                count,
                selected,
                visible,
            }
        })
        .collect();

    FacetView {
        facet,
        key: facet.url_key(),
        title: facet.title(),
        kind: facet.kind(),
        active: state.is_active(facet),
        options,
    }
}
