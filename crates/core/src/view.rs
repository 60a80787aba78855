//! Record store and view controller
//!
//! [`render`] is the whole pipeline for one state: filter, sort, encode the
//! URL, recompute facet counts, then slice the requested page. It is pure, so
//! the server can call it per request and the browser binding per event.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::facets::{facet_options, facet_view, Facet, FacetOption, FacetView};
use crate::filter::filter_games;
use crate::filter_state::{Event, FilterState, HistoryAction, NumericRange};
use crate::models::Game;
use crate::options::GAMES_PER_PAGE;
use crate::pagination::{paginate, PageLink};
use crate::sort::{sort_games, SortKey};
use crate::url_state;

/// The loaded collection. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    games: Vec<Game>,
    options: BTreeMap<Facet, Vec<FacetOption>>,
    age_bounds: Option<NumericRange>,
}

impl Catalog {
    pub fn new(games: Vec<Game>) -> Self {
        let options = Facet::ALL
            .iter()
            .map(|&facet| (facet, facet_options(facet, &games)))
            .collect();
        // A missing minimum age counts as 0 here, as it does when filtering.
        let ages = games.iter().map(|g| g.min_age.unwrap_or(0));
        let age_bounds = ages
            .clone()
            .min()
            .zip(ages.max())
            .map(|(min, max)| NumericRange::new(min, max));
        Self { games, options, age_bounds }
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Extent of `min_age` across the catalog, the age slider's track
    pub fn age_bounds(&self) -> Option<NumericRange> {
        self.age_bounds
    }

    pub fn options(&self, facet: Facet) -> &[FacetOption] {
        self.options.get(&facet).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Widget state for every facet under `state`
    pub fn facet_views(&self, state: &FilterState) -> Vec<FacetView> {
        Facet::ALL
            .iter()
            .map(|&facet| facet_view(facet, &self.games, self.options(facet), state))
            .collect()
    }

    /// Collapse `state` to its canonical form for this catalog
    pub fn canonical(&self, state: &FilterState) -> FilterState {
        state.clone().normalized().with_age_bounds(self.age_bounds)
    }
}

/// Everything a renderer needs for one state
#[derive(Debug, Clone, Serialize)]
pub struct View {
    pub state: FilterState,
    /// Canonical query string, without the leading `?`
    pub query: String,
    pub games: Vec<Game>,
    pub page: u32,
    pub total_pages: u32,
    pub pagination: Vec<PageLink>,
    pub matched: usize,
    pub total: usize,
    pub stats: String,
    pub facets: Vec<FacetView>,
    pub sort_options: Vec<SortOption>,
    pub any_filter_active: bool,
    pub no_results: bool,
    /// Games matched, but the requested page lies past the last one
    pub past_end: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SortOption {
    pub key: SortKey,
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// `"1,234"` style grouping
fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `"N games"` when nothing is filtered out, `"N of M games"` otherwise
pub fn stats_text(matched: usize, total: usize) -> String {
    if matched == total {
        format!("{} games", group_thousands(matched))
    } else {
        format!("{} of {} games", group_thousands(matched), group_thousands(total))
    }
}

/// Run the full pipeline for `state`.
pub fn render(catalog: &Catalog, state: &FilterState, page_size: usize) -> View {
    let state = catalog.canonical(state);

    let filtered = filter_games(catalog.games(), &state);
    let sorted = sort_games(&filtered, state.sort);
    let query = url_state::encode(&state);
    let facets = catalog.facet_views(&state);
    let page = paginate(&sorted, page_size, state.page);

    debug!(
        total = catalog.len(),
        matched = sorted.len(),
        page = page.page,
        query = %query,
        "rendered view"
    );

    let games: Vec<Game> = page.items.iter().map(|g| (*g).clone()).collect();
    View {
        query,
        no_results: games.is_empty(),
        past_end: page.is_past_end(),
        games,
        page: page.page,
        total_pages: page.total_pages,
        pagination: page.window,
        matched: sorted.len(),
        total: catalog.len(),
        stats: stats_text(sorted.len(), catalog.len()),
        facets,
        sort_options: SortKey::ALL
            .iter()
            .map(|&key| SortOption {
                key,
                value: key.as_str(),
                label: key.label(),
                selected: key == state.sort,
            })
            .collect(),
        any_filter_active: state.any_filter_active(),
        state,
    }
}

/// Result of dispatching one event
#[derive(Debug, Clone, Serialize)]
pub struct Transition {
    pub view: View,
    pub history: HistoryAction,
}

/// Holds the catalog and the current state; each event replaces the state wholesale.
#[derive(Debug, Clone)]
pub struct ViewController {
    catalog: Catalog,
    state: FilterState,
    page_size: usize,
}

impl ViewController {
    pub fn new(catalog: Catalog) -> Self {
        Self::with_page_size(catalog, GAMES_PER_PAGE)
    }

    pub fn with_page_size(catalog: Catalog, page_size: usize) -> Self {
        Self {
            catalog,
            state: FilterState::default(),
            page_size: page_size.max(1),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn render(&self) -> View {
        render(&self.catalog, &self.state, self.page_size)
    }

    /// Apply `event` and render the resulting state.
    pub fn dispatch(&mut self, event: &Event) -> Transition {
        let next = self.state.apply(event);
        self.state = self.catalog.canonical(&next);
        Transition {
            view: self.render(),
            history: event.history_action(),
        }
    }
}
