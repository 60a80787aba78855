use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use mybgg_core::url_state::decode;
use mybgg_core::{all_counts, filter_games, render, Catalog, EntityRef, Game, PlayerSuggestion};

const CATEGORIES: [&str; 6] = ["Economic", "Party Game", "Fantasy", "Animals", "Wargame", "Abstract Strategy"];
const MECHANICS: [&str; 5] = ["Hand Management", "Tile Placement", "Dice Rolling", "Worker Placement", "Cooperative Game"];
const PLAYERS: [&str; 5] = ["1-4", "2-5", "3", "2", "6+"];
const TYPES: [&str; 3] = ["best", "recommended", "expansion"];

fn synthetic_games(n: usize) -> Vec<Game> {
    (0..n)
        .map(|i| Game {
            id: i as i64,
            name: format!("Game {:05}", i),
            description: format!("Synthetic game number {}", i),
            categories: vec![CATEGORIES[i % 6].to_string(), CATEGORIES[(i / 7) % 6].to_string()],
            mechanics: vec![MECHANICS[i % 5].to_string()],
            players: vec![
                PlayerSuggestion::new(PLAYERS[i % 5], "recommended"),
                PlayerSuggestion::new((1 + i % 6).to_string(), TYPES[i % 3]),
            ],
            weight: Some(1.0 + (i % 40) as f64 / 10.0),
            min_age: Some(6 + (i % 12) as u32),
            numplays: Some((i % 15) as u32),
            rank: (i % 4 != 0).then_some(i as u32),
            rating: Some(5.0 + (i % 50) as f64 / 10.0),
            year: Some(1990 + (i % 35) as i32),
            playing_time: Some(["< 30min", "1-2h", "2-3h"][i % 3].to_string()),
            tags: vec!["own".to_string()],
            publishers: vec![EntityRef::new(i % 30, format!("Publisher {}", i % 30))],
            designers: vec![EntityRef::new(i % 90, format!("Designer {}", i % 90))],
            ..Default::default()
        })
        .collect()
}

fn bench_leave_one_out(c: &mut Criterion) {
    let games = synthetic_games(2_000);
    let state = decode("categories=Economic,Fantasy&players=3&weight=Medium&sort=rating");

    c.bench_function("filter_2000", |b| {
        b.iter(|| black_box(filter_games(black_box(&games), black_box(&state)).len()))
    });

    c.bench_function("all_counts_2000", |b| {
        b.iter(|| black_box(all_counts(black_box(&games), black_box(&state)).len()))
    });

    let catalog = Catalog::new(games.clone());
    c.bench_function("render_2000", |b| {
        b.iter(|| black_box(render(black_box(&catalog), black_box(&state), 60).matched))
    });
}

criterion_group!(benches, bench_leave_one_out);
criterion_main!(benches);
