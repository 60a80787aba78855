//! HTTP client for the catalog API
//!
//! Uses gloo-net for browser fetch API

use gloo_net::http::Request;
use mybgg_core::Game;

/// `api_base`, or the page's own origin when none is given
pub fn api_origin(api_base: Option<&str>) -> String {
    match api_base {
        Some(base) if !base.is_empty() => base.trim_end_matches('/').to_string(),
        _ => web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_default(),
    }
}

/// Fetch every game record from `/api/games`
pub async fn fetch_games(origin: &str) -> Result<Vec<Game>, String> {
    let url = format!("{}/api/games", origin);

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        return Err(format!("Request failed with status {}: {}", status, text));
    }

    let body = response
        .text()
        .await
        .map_err(|e| format!("Failed to read response: {}", e))?;
    mybgg_core::load_games_json(&body).map_err(|e| format!("Failed to parse games: {}", e))
}
