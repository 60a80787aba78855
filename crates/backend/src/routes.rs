//! REST API routes

use axum::{
    body::Bytes,
    extract::{RawQuery, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use mybgg_core::{render, url_state, Game, View};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/games", get(get_games))
        .route("/api/view", get(get_view))
        .with_state(state)
        .layer(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}

#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    pub games: usize,
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<Health> {
    Json(Health {
        status: "ok",
        games: state.catalog.len(),
    })
}

/// Every record, serialized once at startup
pub async fn get_games(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        state.games_json.clone(),
    )
}

/// Filtered, sorted and paginated view for a URL query string
pub async fn get_view(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Json<View> {
    let filters = url_state::decode(query.as_deref().unwrap_or(""));
    let view = render(&state.catalog, &filters, state.games_per_page);
    tracing::debug!(query = %view.query, matched = view.matched, "view rendered");
    Json(view)
}

/// Serialize the catalog for `/api/games`
pub fn games_payload(games: &[Game]) -> serde_json::Result<Bytes> {
    serde_json::to_vec(games).map(Bytes::from)
}
