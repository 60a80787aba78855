//! Query-string codec for [`FilterState`]
//!
//! Encoding is canonical-minimal: any value that means "no constraint" is
//! omitted, keys always appear in the same order, and set values are emitted
//! sorted. Two states that filter identically therefore encode identically.
//!
//! Decoding is total. Unknown keys are ignored and malformed values fall back
//! to the unconstrained default for their facet.

use std::borrow::Cow;
use std::collections::{BTreeSet, HashMap};

use crate::facets::Facet;
use crate::filter_state::{FilterState, NumericRange, PlayerChoice};
use crate::sort::SortKey;

const QUERY_KEY: &str = "q";
const SORT_KEY: &str = "sort";
const PAGE_KEY: &str = "page";

/// Keys in the order they are written
const KEY_ORDER: [&str; 18] = [
    QUERY_KEY,
    "categories",
    "mechanics",
    "players",
    "weight",
    "playing_time",
    "previous_players",
    "min_age",
    "numplays",
    "publishers",
    "designers",
    "artists",
    "years",
    "status",
    "wishlist",
    "age",
    SORT_KEY,
    PAGE_KEY,
];

fn facet_for_key(key: &str) -> Option<Facet> {
    Facet::ALL.into_iter().find(|f| f.url_key() == key)
}

fn encode_list(values: &BTreeSet<String>) -> String {
    values
        .iter()
        .map(|v| urlencoding::encode(v))
        .collect::<Vec<Cow<'_, str>>>()
        .join(",")
}

fn value_for(state: &FilterState, key: &str) -> Option<String> {
    match key {
        QUERY_KEY => (!state.query.is_empty()).then(|| urlencoding::encode(&state.query).into_owned()),
        SORT_KEY => (state.sort != SortKey::Name).then(|| state.sort.as_str().to_string()),
        PAGE_KEY => (state.page > 1).then(|| state.page.to_string()),
        _ => match facet_for_key(key)? {
            Facet::Players => (!state.players.is_any()).then(|| urlencoding::encode(&state.players.value()).into_owned()),
            Facet::MinAge => state.min_age.map(|r| r.to_string()),
            Facet::NumPlays => state.numplays.map(|r| r.to_string()),
            Facet::AgeRange => state.age.map(|r| r.to_string()),
            facet => state
                .selection(facet)
                .filter(|set| !set.is_empty())
                .map(encode_list),
        },
    }
}

/// Encode `state` as a query string without the leading `?`.
///
/// The unconstrained state encodes to `""`.
pub fn encode(state: &FilterState) -> String {
    let state = state.clone().normalized();
    KEY_ORDER
        .iter()
        .filter_map(|key| value_for(&state, key).map(|value| format!("{}={}", key, value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// `path` with the encoded state appended, or `path` alone when unconstrained
pub fn to_url(path: &str, state: &FilterState) -> String {
    let query = encode(state);
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, query)
    }
}

/// Percent-decode one component; `+` is a space. Invalid UTF-8 is replaced, never rejected.
fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    String::from_utf8_lossy(&urlencoding::decode_binary(spaced.as_bytes())).into_owned()
}

fn decode_list(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(decode_component)
        .filter(|v| !v.is_empty())
        .collect()
}

fn decode_range(raw: &str) -> Option<NumericRange> {
    NumericRange::parse(&decode_component(raw))
}

/// Raw key/value pairs; the first occurrence of a key wins.
fn parse_pairs(query: &str) -> HashMap<String, &str> {
    let mut pairs = HashMap::new();
    let query = query.strip_prefix('?').unwrap_or(query);
    for part in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = part.split_once('=').unwrap_or((part, ""));
        pairs.entry(decode_component(key)).or_insert(value);
    }
    pairs
}

/// Decode a query string (with or without the leading `?`). Never fails.
pub fn decode(query: &str) -> FilterState {
    let pairs = parse_pairs(query);
    let mut state = FilterState::default();

    for (key, raw) in &pairs {
        match key.as_str() {
            QUERY_KEY => state.query = decode_component(raw),
            SORT_KEY => state.sort = SortKey::parse(&decode_component(raw)),
            PAGE_KEY => state.page = decode_component(raw).trim().parse().unwrap_or(1),
            other => match facet_for_key(other) {
                Some(Facet::Players) => state.players = PlayerChoice::parse(&decode_component(raw)),
                Some(Facet::MinAge) => state.min_age = decode_range(raw),
                Some(Facet::NumPlays) => state.numplays = decode_range(raw),
                Some(Facet::AgeRange) => state.age = decode_range(raw),
                Some(facet) => {
                    if let Some(set) = state.selection_mut(facet) {
                        *set = decode_list(raw);
                    }
                }
                None => {}
            },
        }
    }

    state.normalized()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_encodes_empty() {
        assert_eq!(encode(&FilterState::default()), "");
        assert_eq!(to_url("/", &FilterState::default()), "/");
    }

    #[test]
    fn sentinels_are_omitted() {
        let state = FilterState {
            min_age: Some(NumericRange::new(0, 100)),
            numplays: Some(NumericRange::new(0, 9999)),
            players: PlayerChoice::Any,
            sort: SortKey::Name,
            page: 1,
            ..Default::default()
        };
        assert_eq!(encode(&state), "");
    }

    #[test]
    fn keys_follow_fixed_order() {
        let mut state = FilterState {
            query: "brass".into(),
            players: PlayerChoice::Count { count: 3 },
            age: Some(NumericRange::new(8, 14)),
            sort: SortKey::Rank,
            page: 2,
            ..Default::default()
        };
        state.categories.insert("Strategy".into());
        state.categories.insert("Economic".into());
        state.years.insert("2018".into());
        assert_eq!(
            encode(&state),
            "q=brass&categories=Economic,Strategy&players=3&years=2018&age=8-14&sort=rank&page=2"
        );
    }

    #[test]
    fn values_with_commas_and_spaces_survive() {
        let mut state = FilterState::default();
        state.publishers.insert("Stronghold Games, LLC".into());
        state.publishers.insert("Z-Man Games".into());
        state.playing_time.insert("< 30min".into());
        let encoded = encode(&state);
        assert!(encoded.contains("Stronghold%20Games%2C%20LLC"));
        assert_eq!(decode(&encoded), state);
    }

    #[test]
    fn decode_is_total() {
        let state = decode("?players=lots&min_age=old&numplays=9-1&sort=nope&page=-3&bogus=1&%zz");
        assert_eq!(state, FilterState::default());
    }

    #[test]
    fn plus_decodes_to_space_and_first_key_wins() {
        let state = decode("q=Ticket+to+Ride&q=other&wishlist=Must+Have");
        assert_eq!(state.query, "ticket to ride");
        assert!(state.wishlist.contains("Must Have"));
    }

    #[test]
    fn page_zero_becomes_one() {
        assert_eq!(decode("page=0").page, 1);
        assert_eq!(decode("page=7").page, 7);
    }

    #[test]
    fn composite_player_value_round_trips() {
        let state = FilterState {
            players: PlayerChoice::CountWithType { count: 4, recommendation: "best".into() },
            min_age: Some(NumericRange::new(0, 12)),
            ..Default::default()
        };
        let encoded = encode(&state);
        assert_eq!(encoded, "players=4-best&min_age=0-12");
        assert_eq!(decode(&encoded), state);
    }
}
