//! Browser session: one view controller driven by DOM events

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_timers::callback::Timeout;
use mybgg_core::{Catalog, Debouncer, Event, Facet, NumericRange, SortKey, View, ViewController};
use wasm_bindgen::prelude::*;

use crate::history;

struct Inner {
    controller: ViewController,
    search: Debouncer<String>,
    search_timer: Option<Timeout>,
    render: js_sys::Function,
}

fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

fn view_to_js(view: &View) -> Result<JsValue, JsValue> {
    let json = serde_json::to_string(view).map_err(|e| JsValue::from_str(&e.to_string()))?;
    js_sys::JSON::parse(&json)
}

/// Apply `event`, update the address bar and hand the new view to the renderer.
///
/// The borrow is released before calling into JS so the render callback may
/// dispatch further events.
fn dispatch(inner: &Rc<RefCell<Inner>>, event: Event) -> Result<(), JsValue> {
    let (transition, render) = {
        let mut inner = inner.borrow_mut();
        let transition = inner.controller.dispatch(&event);
        (transition, inner.render.clone())
    };
    history::record(transition.history, &transition.view.query)?;
    render.call1(&JsValue::NULL, &view_to_js(&transition.view)?)?;
    Ok(())
}

fn log_error(result: Result<(), JsValue>) {
    if let Err(e) = result {
        tracing::error!("Failed to update view: {:?}", e);
    }
}

/// Release the debounced search text if it is due, otherwise re-arm the timer.
fn flush_search(weak: Weak<RefCell<Inner>>) {
    let Some(inner) = weak.upgrade() else { return };
    let due = {
        let mut state = inner.borrow_mut();
        // This timer is the one firing; dropping it here would free the running callback.
        if let Some(fired) = state.search_timer.take() {
            let _ = fired.forget();
        }
        let now = now_ms();
        match state.search.poll(now) {
            Some(text) => Some(text),
            None => {
                if let Some(wait) = state.search.remaining(now) {
                    state.search_timer = Some(schedule(Rc::downgrade(&inner), wait));
                }
                None
            }
        }
    };
    if let Some(query) = due {
        log_error(dispatch(&inner, Event::Search { query }));
    }
}

fn schedule(weak: Weak<RefCell<Inner>>, wait_ms: u64) -> Timeout {
    let millis = u32::try_from(wait_ms).unwrap_or(u32::MAX);
    Timeout::new(millis, move || flush_search(weak))
}

#[wasm_bindgen]
pub struct CatalogSession {
    inner: Rc<RefCell<Inner>>,
}

impl CatalogSession {
    pub(crate) fn new(catalog: Catalog, page_size: usize, render: js_sys::Function) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                controller: ViewController::with_page_size(catalog, page_size),
                search: Debouncer::default(),
                search_timer: None,
                render,
            })),
        }
    }

    /// Render the state in the address bar and follow back/forward navigation
    pub(crate) fn attach(&self) -> Result<(), JsValue> {
        self.navigate(&history::current_query())?;
        let weak = Rc::downgrade(&self.inner);
        history::listen(move |query| {
            if let Some(inner) = weak.upgrade() {
                log_error(dispatch(&inner, Event::Navigate { query }));
            }
        })
    }

    fn send(&self, event: Event) -> Result<(), JsValue> {
        dispatch(&self.inner, event)
    }
}

#[wasm_bindgen]
impl CatalogSession {
    /// Search box input; re-filters once typing pauses
    pub fn search(&self, text: String) {
        let mut inner = self.inner.borrow_mut();
        inner.search.push(text, now_ms());
        let wait = inner.search.wait_ms();
        inner.search_timer = Some(schedule(Rc::downgrade(&self.inner), wait));
    }

    /// Checkbox click, or radio selection for `players`, `min_age` and `numplays`
    pub fn toggle(&self, facet: &str, value: String) -> Result<(), JsValue> {
        let facet = Facet::ALL
            .into_iter()
            .find(|f| f.url_key() == facet)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown facet: {}", facet)))?;
        self.send(Event::Toggle { facet, value })
    }

    #[wasm_bindgen(js_name = setAgeRange)]
    pub fn set_age_range(&self, min: u32, max: u32) -> Result<(), JsValue> {
        self.send(Event::SetAgeRange { range: Some(NumericRange::new(min.min(max), max.max(min))) })
    }

    #[wasm_bindgen(js_name = resetAgeRange)]
    pub fn reset_age_range(&self) -> Result<(), JsValue> {
        self.send(Event::SetAgeRange { range: None })
    }

    pub fn sort(&self, key: &str) -> Result<(), JsValue> {
        self.send(Event::Sort { key: SortKey::parse(key) })
    }

    #[wasm_bindgen(js_name = goToPage)]
    pub fn go_to_page(&self, page: u32) -> Result<(), JsValue> {
        self.send(Event::GoToPage { page })
    }

    #[wasm_bindgen(js_name = clearAll)]
    pub fn clear_all(&self) -> Result<(), JsValue> {
        self.inner.borrow_mut().search.cancel();
        self.send(Event::ClearAll)
    }

    /// Load a query string without touching history
    pub fn navigate(&self, query: &str) -> Result<(), JsValue> {
        self.send(Event::Navigate { query: query.to_string() })
    }

    /// The current view, as a plain JS object
    pub fn view(&self) -> Result<JsValue, JsValue> {
        let view = self.inner.borrow().controller.render();
        view_to_js(&view)
    }
}
