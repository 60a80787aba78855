//! MyBGG WASM Frontend
//!
//! Fetches the catalog from the backend, then filters, counts and paginates
//! entirely in the browser. Rendering stays in JavaScript: every state change
//! calls the supplied render callback with the new view.

#![cfg(target_arch = "wasm32")]

mod history;
mod http_client;
mod session;

use mybgg_core::options::GAMES_PER_PAGE;
use mybgg_core::Catalog;
use wasm_bindgen::prelude::*;

pub use session::CatalogSession;

#[wasm_bindgen(start)]
pub fn main() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize tracing for WASM
    tracing_wasm::set_as_global_default();
}

/// Load the catalog and render the state in the current URL.
///
/// `api_base` defaults to the page origin and `page_size` to 60.
#[wasm_bindgen]
pub async fn start(
    render: js_sys::Function,
    api_base: Option<String>,
    page_size: Option<usize>,
) -> Result<CatalogSession, JsValue> {
    let origin = http_client::api_origin(api_base.as_deref());
    let games = http_client::fetch_games(&origin)
        .await
        .map_err(|e| JsValue::from_str(&e))?;
    tracing::info!("Loaded {} games", games.len());

    let session = CatalogSession::new(
        Catalog::new(games),
        page_size.unwrap_or(GAMES_PER_PAGE),
        render,
    );
    session.attach()?;
    Ok(session)
}
