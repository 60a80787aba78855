//! Keeps the address bar in sync with the filter state

use mybgg_core::HistoryAction;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Current `location.search`, including the leading `?` when present
pub fn current_query() -> String {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

fn url_for(query: &str) -> String {
    let path = web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string());
    if query.is_empty() {
        path
    } else {
        format!("{}?{}", path, query)
    }
}

/// Record `query` in the session history as `action` asks
pub fn record(action: HistoryAction, query: &str) -> Result<(), JsValue> {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return Ok(());
    };
    let url = url_for(query);
    match action {
        HistoryAction::Replace => history.replace_state_with_url(&JsValue::NULL, "", Some(url.as_str())),
        HistoryAction::Push => history.push_state_with_url(&JsValue::NULL, "", Some(url.as_str())),
        HistoryAction::None => Ok(()),
    }
}

/// Call `on_change` with the new query string on every back/forward navigation
pub fn listen(mut on_change: impl FnMut(String) + 'static) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
    let closure = Closure::<dyn FnMut(web_sys::PopStateEvent)>::new(move |_event: web_sys::PopStateEvent| {
        on_change(current_query());
    });
    window.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())?;
    // The listener lives as long as the page.
    closure.forget();
    Ok(())
}
