use std::fs;
use std::path::PathBuf;

use mybgg_core::facets::AGE_RANGE_VALUE;
use mybgg_core::url_state::decode;
use mybgg_core::{counts_for, filter_games, load_games_json, Facet, FilterState, Game};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn games() -> Vec<Game> {
    load_games_json(&read_fixture("games.json")).expect("fixture should parse")
}

fn states() -> Vec<FilterState> {
    [
        "",
        "categories=Economic",
        "players=3&weight=Medium%20Heavy",
        "mechanics=Hand%20Management&status=own",
        "wishlist=Must%20Have,Love%20to%20Have&min_age=0-14",
        "q=game&numplays=1-5&age=8-13",
        "players=2-best&years=2017,2016&playing_time=%3C%2030min,1-2h",
    ]
    .iter()
    .map(|q| decode(q))
    .collect()
}

#[test]
fn clearing_a_facet_only_widens() {
    let games = games();
    for state in states() {
        let narrow: Vec<i64> = filter_games(&games, &state).iter().map(|g| g.id).collect();
        for facet in Facet::ALL {
            let wide: Vec<i64> = filter_games(&games, &state.without(facet)).iter().map(|g| g.id).collect();
            assert!(narrow.iter().all(|id| wide.contains(id)), "{:?} narrowed results", facet);
        }
    }
}

#[test]
fn single_valued_facet_counts_partition_the_neutral_set() {
    let games = games();
    for state in states() {
        for facet in [Facet::Weight, Facet::PlayingTime, Facet::Wishlist, Facet::Years] {
            let neutral = filter_games(&games, &state.without(facet));
            let counted: usize = counts_for(facet, &games, &state).values().sum();
            let without_value = neutral
                .iter()
                .filter(|g| match facet {
                    Facet::Weight => g.complexity().is_none(),
                    Facet::PlayingTime => g.playing_time.as_deref().map_or(true, str::is_empty),
                    Facet::Wishlist => g.wishlist_priority.as_deref().map_or(true, str::is_empty),
                    _ => g.year.is_none(),
                })
                .count();
            assert_eq!(counted + without_value, neutral.len(), "{:?}", facet);
        }
    }
}

#[test]
fn sentinel_options_count_the_neutral_set() {
    let games = games();
    for state in states() {
        let players = counts_for(Facet::Players, &games, &state);
        assert_eq!(players["any"], filter_games(&games, &state.without(Facet::Players)).len());

        let ages = counts_for(Facet::MinAge, &games, &state);
        assert_eq!(ages["0-100"], filter_games(&games, &state.without(Facet::MinAge)).len());

        let plays = counts_for(Facet::NumPlays, &games, &state);
        assert_eq!(plays["0-9999"], filter_games(&games, &state.without(Facet::NumPlays)).len());
    }
}

#[test]
fn selected_option_count_matches_filtered_total() {
    let games = games();
    let state = decode("categories=Economic&players=3");
    let total = filter_games(&games, &state).len();
    assert_eq!(counts_for(Facet::Categories, &games, &state)["Economic"], total);
    assert_eq!(counts_for(Facet::Players, &games, &state)["3"], total);
}

#[test]
fn age_slider_count_applies_its_own_range() {
    let games = games();
    let state = decode("age=8-10");
    let counts = counts_for(Facet::AgeRange, &games, &state);
    assert_eq!(counts[AGE_RANGE_VALUE], filter_games(&games, &state).len());
    assert_eq!(counts[AGE_RANGE_VALUE], 3);
}
