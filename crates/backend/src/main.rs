//! MyBGG Backend Server
//!
//! Provides:
//! - REST API for the full record set (`/api/games`)
//! - Server-side filtering, facet counts and pagination (`/api/view?<query>`)
//!
//! The catalog is loaded once at startup and shared read-only between requests.

mod config;
mod routes;

use axum::body::Bytes;
use mybgg_core::{open_catalog, Catalog};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::ServerConfig;

pub struct AppState {
    pub catalog: Catalog,
    /// `/api/games` response body
    pub games_json: Bytes,
    pub games_per_page: usize,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "mybgg=info,mybgg_core=info,mybgg_server=info,tower_http=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();

    let path = config.database_path.clone();
    let catalog = match tokio::task::spawn_blocking(move || open_catalog(path)).await {
        Ok(Ok(catalog)) => catalog,
        Ok(Err(e)) => {
            tracing::error!("Failed to load catalog from {}: {}", config.database_path, e);
            return ExitCode::FAILURE;
        }
        Err(e) => {
            tracing::error!("Catalog loader panicked: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let games_json = match routes::games_payload(catalog.games()) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!("Failed to serialize catalog: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let state = Arc::new(AppState {
        catalog,
        games_json,
        games_per_page: config.games_per_page,
    });

    let app = routes::build_router(state);

    tracing::info!("Starting server on {}", config.bind_address);

    let listener = match tokio::net::TcpListener::bind(&config.bind_address).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", config.bind_address, e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
