//! Loading the catalog from the indexer's SQLite export
//!
//! List-valued columns hold JSON text. A column that fails to parse becomes an
//! empty list and is logged; it never aborts the load.

use std::path::Path;

use rusqlite::types::Value;
use rusqlite::{Connection, OpenFlags, Row};
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::error::Result;
use crate::models::Game;
use crate::view::Catalog;

const SELECT_GAMES: &str = "
    SELECT id, name, description, categories, mechanics, players, weight,
           playing_time, min_age, rank, usersrated, numowned, rating,
           numplays, image, thumbnail, tags, previous_players, expansions, color,
           unixepoch(last_modified) AS last_modified,
           publishers, designers, artists, year, wishlist_priority, accessories,
           po_exp, po_acc, wl_exp, wl_acc, alternate_names, comment, wishlist_comment,
           families, reimplements, reimplementedby, integrates, contained,
           average, suggested_age, first_played, last_played, version_name, version_year
    FROM games
    ORDER BY name";

/// Open a catalog file read-only and load every game.
pub fn open_catalog(path: impl AsRef<Path>) -> Result<Catalog> {
    let path = path.as_ref();
    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
    let games = load_games(&conn)?;
    info!("Loaded {} games from {}", games.len(), path.display());
    Ok(Catalog::new(games))
}

pub fn load_games(conn: &Connection) -> Result<Vec<Game>> {
    let mut stmt = conn.prepare(SELECT_GAMES)?;
    let games = stmt
        .query_map([], read_game)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(games)
}

fn read_game(row: &Row<'_>) -> rusqlite::Result<Game> {
    let id = number(row.get("id")?).map(|n| n as i64).unwrap_or(0);
    let list = |column: &str| -> rusqlite::Result<Value> { row.get(column) };

    Ok(Game {
        id,
        name: text(row.get("name")?).unwrap_or_default(),
        description: text(row.get("description")?).unwrap_or_default(),
        image: text(row.get("image")?),
        thumbnail: text(row.get("thumbnail")?),
        color: text(row.get("color")?),

        weight: number(row.get("weight")?),
        min_age: unsigned(row.get("min_age")?),
        numplays: unsigned(row.get("numplays")?),
        rank: unsigned(row.get("rank")?),
        rating: number(row.get("rating")?),
        average: number(row.get("average")?),
        usersrated: unsigned(row.get("usersrated")?),
        numowned: unsigned(row.get("numowned")?),
        year: number(row.get("year")?).map(|n| n as i32),
        last_modified: number(row.get("last_modified")?).map(|n| n as i64),
        suggested_age: number(row.get("suggested_age")?),

        playing_time: text(row.get("playing_time")?),
        wishlist_priority: text(row.get("wishlist_priority")?),
        comment: text(row.get("comment")?),
        wishlist_comment: text(row.get("wishlist_comment")?),
        first_played: text(row.get("first_played")?),
        last_played: text(row.get("last_played")?),
        version_name: text(row.get("version_name")?),
        version_year: number(row.get("version_year")?).map(|n| n as i32),

        players: json_list(id, "players", list("players")?),
        categories: json_list(id, "categories", list("categories")?),
        mechanics: json_list(id, "mechanics", list("mechanics")?),
        tags: json_list(id, "tags", list("tags")?),
        previous_players: json_list(id, "previous_players", list("previous_players")?),
        alternate_names: json_list(id, "alternate_names", list("alternate_names")?),

        publishers: json_list(id, "publishers", list("publishers")?),
        designers: json_list(id, "designers", list("designers")?),
        artists: json_list(id, "artists", list("artists")?),
        expansions: json_list(id, "expansions", list("expansions")?),
        accessories: json_list(id, "accessories", list("accessories")?),
        families: json_list(id, "families", list("families")?),
        reimplements: json_list(id, "reimplements", list("reimplements")?),
        reimplementedby: json_list(id, "reimplementedby", list("reimplementedby")?),
        integrates: json_list(id, "integrates", list("integrates")?),
        contained: json_list(id, "contained", list("contained")?),
        po_exp: json_list(id, "po_exp", list("po_exp")?),
        wl_exp: json_list(id, "wl_exp", list("wl_exp")?),
        po_acc: json_list(id, "po_acc", list("po_acc")?),
        wl_acc: json_list(id, "wl_acc", list("wl_acc")?),
    })
}

/// Numeric value of an INTEGER, REAL or numeric TEXT column
fn number(value: Value) -> Option<f64> {
    let n = match value {
        Value::Integer(i) => i as f64,
        Value::Real(r) => r,
        Value::Text(s) => s.trim().parse().ok()?,
        Value::Null | Value::Blob(_) => return None,
    };
    n.is_finite().then_some(n)
}

fn unsigned<T: TryFrom<u64>>(value: Value) -> Option<T> {
    let n = number(value)?;
    if n < 0.0 {
        return None;
    }
    T::try_from(n as u64).ok()
}

fn text(value: Value) -> Option<String> {
    match value {
        Value::Text(s) => Some(s),
        Value::Integer(i) => Some(i.to_string()),
        Value::Real(r) => Some(r.to_string()),
        Value::Null | Value::Blob(_) => None,
    }
}

/// A JSON list column; NULL, empty and malformed values all become an empty list.
fn json_list<T: DeserializeOwned>(id: i64, field: &str, value: Value) -> Vec<T> {
    let raw = match value {
        Value::Text(s) if !s.trim().is_empty() => s,
        _ => return Vec::new(),
    };
    match serde_json::from_str::<Option<Vec<T>>>(&raw) {
        Ok(list) => list.unwrap_or_default(),
        Err(e) => {
            warn!(game_id = id, field, error = %e, "Malformed JSON column, using an empty list");
            Vec::new()
        }
    }
}
