use leptos::prelude::*;
use web_sys::window;

use super::tabs::{query_for, tab_from_query, Tab};

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub active: RwSignal<Tab>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            active: RwSignal::new(Tab::default()),
        }
    }

    pub fn activate_tab(&self, tab: Tab) {
        log::debug!("activate_tab: {}", tab.key());
        self.active.set(tab);
    }

    /// Select the tab named in the address bar and keep the address in step
    pub fn init_router_integration(&self) {
        let search = current_search();
        self.active.set(tab_from_query(&search));

        let this = *self;
        Effect::new(move |_| {
            let new_url = query_for(this.active.get());
            if current_search() != new_url {
                if let Some(w) = window() {
                    if let Ok(history) = w.history() {
                        let _ = history.replace_state_with_url(
                            &wasm_bindgen::JsValue::NULL,
                            "",
                            Some(&new_url),
                        );
                    }
                }
            }
        });
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

fn current_search() -> String {
    window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}
