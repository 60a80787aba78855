#![cfg(feature = "sqlite")]

use std::fs;
use std::path::PathBuf;

use mybgg_core::{load_games, open_catalog, url_state, render, CatalogError, EntityRef};
use rusqlite::Connection;

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn fixture_db() -> Connection {
    let conn = Connection::open_in_memory().expect("in-memory database");
    conn.execute_batch(&read_fixture("schema.sql")).expect("schema should apply");
    conn
}

#[test]
fn loads_rows_ordered_by_name() {
    let games = load_games(&fixture_db()).expect("games should load");
    let names: Vec<&str> = games.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["Agricola", "Azul", "Broken Row"]);
}

#[test]
fn decodes_json_columns_and_timestamps() {
    let games = load_games(&fixture_db()).expect("games should load");
    let azul = &games[1];
    assert_eq!(azul.categories, vec!["Abstract Strategy"]);
    assert_eq!(azul.players.len(), 2);
    assert_eq!(azul.publishers, vec![EntityRef::new(2, "Plan B Games")]);
    assert_eq!(azul.alternate_names, vec!["Azul: Mosaico"]);
    assert_eq!(azul.color.as_deref(), Some("70, 130, 180"));
    assert_eq!(azul.last_modified, Some(1_710_000_000));
    assert_eq!(azul.last_modified_at().map(|d| d.to_rfc3339()).as_deref(), Some("2024-03-09T16:00:00+00:00"));

    let agricola = &games[0];
    assert_eq!(agricola.weight, Some(3.6));
    assert_eq!(agricola.expansions[0].name, "Agricola: Farmers of the Moor");
    assert!(agricola.alternate_names.is_empty());
}

#[test]
fn malformed_row_degrades_instead_of_failing() {
    let games = load_games(&fixture_db()).expect("games should load");
    let broken = &games[2];
    assert!(broken.categories.is_empty());
    assert!(broken.players.is_empty());
    assert!(broken.publishers.is_empty());
    assert!(broken.tags.is_empty());
    assert_eq!(broken.mechanics, vec!["Dice Rolling"]);
    assert_eq!(broken.weight, None);
    assert_eq!(broken.rank, None);
    assert_eq!(broken.description, "");
}

#[test]
fn open_catalog_reads_a_file() {
    let path = std::env::temp_dir().join(format!("mybgg-store-test-{}.sqlite", std::process::id()));
    let _ = fs::remove_file(&path);
    {
        let conn = Connection::open(&path).expect("create database file");
        conn.execute_batch(&read_fixture("schema.sql")).expect("schema should apply");
    }

    let catalog = open_catalog(&path).expect("catalog should open");
    assert_eq!(catalog.len(), 3);
    let view = render(&catalog, &url_state::decode("q=mosaico"), 60);
    assert_eq!(view.matched, 1);

    fs::remove_file(&path).expect("remove database file");
}

#[test]
fn missing_file_is_a_database_error() {
    let path = std::env::temp_dir().join("mybgg-store-test-does-not-exist.sqlite");
    match open_catalog(&path) {
        Err(CatalogError::Database(_)) => {}
        other => panic!("expected a database error, got {:?}", other.map(|c| c.len())),
    }
}
