//! Core engine for the MyBGG collection browser
//!
//! This crate contains:
//! - Game records and the player-count token parser
//! - The filter predicate, leave-one-out facet counts and sorting
//! - The canonical URL codec, pagination and the view controller
//! - Error types
//! - The SQLite loader (with the `sqlite` feature)

pub mod debounce;
pub mod error;
pub mod facets;
pub mod filter;
pub mod filter_state;
pub mod models;
pub mod options;
pub mod pagination;
pub mod player_range;
pub mod sort;
pub mod url_state;
pub mod view;

#[cfg(feature = "sqlite")]
pub mod store;

pub use debounce::Debouncer;
pub use error::*;
pub use facets::{all_counts, counts_for, facet_options, Facet, FacetCounts, FacetKind, FacetOption, FacetView, OptionView};
pub use filter::{filter_games, matches, Matcher};
pub use filter_state::{Event, FilterState, HistoryAction, NumericRange, PlayerChoice};
pub use models::*;
pub use pagination::{paginate, Page, PageLink};
pub use player_range::{parse_player_count, PlayerRange};
pub use sort::{sort_games, SortKey};
pub use view::{render, Catalog, Transition, View, ViewController};

#[cfg(feature = "sqlite")]
pub use store::{load_games, open_catalog};
