//! MyBGG terminal browser
//!
//! Loads the exported collection, applies a URL-style filter query and prints
//! the resulting page:
//!
//! ```text
//! mybgg "categories=Economic&players=3&sort=rank" --facets
//! ```

mod config;
mod output;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use mybgg_core::{open_catalog, render, url_state, CatalogError, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::{Config, CONFIG_PATH};

#[derive(Parser)]
#[command(
    name = "mybgg",
    version = env!("CARGO_PKG_VERSION"),
    about = "Browse a board-game collection from the terminal",
    long_about = None,
)]
struct Args {
    /// Filter state as a query string, e.g. "categories=Economic&sort=rank"
    query: Option<String>,

    #[arg(long, default_value = CONFIG_PATH)]
    config: PathBuf,

    /// Overrides `database_path` from the config file
    #[arg(long)]
    database: Option<PathBuf>,

    /// Overrides `games_per_page` from the config file
    #[arg(long = "per-page")]
    per_page: Option<usize>,

    /// 1-based page; overrides any `page` in the query
    #[arg(long)]
    page: Option<u32>,

    /// Also print every facet with its counts
    #[arg(long)]
    facets: bool,

    /// Print the whole view as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mybgg=info,mybgg_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = Config::load(&args.config);
    if let Some(database) = &args.database {
        config.database_path = database.display().to_string();
    }
    if let Some(per_page) = args.per_page {
        config.games_per_page = per_page;
    }
    if config.games_per_page == 0 {
        return Err(CatalogError::Config("games_per_page must be at least 1".into()));
    }

    let catalog = open_catalog(&config.database_path)?;

    let mut state = url_state::decode(args.query.as_deref().unwrap_or(""));
    if let Some(page) = args.page {
        state.page = page.max(1);
    }
    let view = render(&catalog, &state, config.games_per_page);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &view)?;
        writeln!(out)?;
    } else {
        output::print_view(&mut out, &config.title, &view, args.facets)?;
        if let Some(url) = config.collection_url() {
            tracing::debug!("Collection source: {}", url);
        }
    }
    Ok(())
}
