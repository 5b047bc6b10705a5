use leptos::prelude::Effect;
use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

/// Top-level pages reachable from the sidebar
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Page {
    #[default]
    Dashboard,
    Chatbot,
    Olap,
    Analytics,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Dashboard, Page::Chatbot, Page::Olap, Page::Analytics];

    /// Value of the `?active=` query parameter
    pub fn key(self) -> &'static str {
        match self {
            Page::Dashboard => "dashboard",
            Page::Chatbot => "chatbot",
            Page::Olap => "olap",
            Page::Analytics => "analytics",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Chatbot => "Chatbot",
            Page::Olap => "Análisis OLAP",
            Page::Analytics => "Analytics",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Page::Dashboard => "dashboard",
            Page::Chatbot => "chat",
            Page::Olap => "cube",
            Page::Analytics => "analytics",
        }
    }

    pub fn from_key(key: &str) -> Option<Page> {
        Page::ALL.into_iter().find(|p| p.key() == key)
    }
}

/// Page named by a raw location search string ("?active=olap"), if any
pub fn page_from_search(search: &str) -> Option<Page> {
    let params: HashMap<String, String> =
        serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
    params.get("active").and_then(|key| Page::from_key(key))
}

pub fn search_for_page(page: Page) -> String {
    let query = serde_qs::to_string(&HashMap::from([("active", page.key())])).unwrap_or_default();
    format!("?{}", query)
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub active: RwSignal<Page>,
    pub left_open: RwSignal<bool>,
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            active: RwSignal::new(Page::default()),
            left_open: RwSignal::new(true),
        }
    }

    /// Reads `?active=` once, then mirrors the active page back into the URL
    pub fn init_router_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        if let Some(page) = page_from_search(&search) {
            self.active.set(page);
        }

        let this = *self;
        Effect::new(move |_| {
            let new_url = search_for_page(this.active.get());
            let current_search = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();

            if current_search != new_url {
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

    pub fn navigate(&self, page: Page) {
        leptos::logging::log!("navigate: {}", page.key());
        self.active.set(page);
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_keys_round_trip() {
        for page in Page::ALL {
            assert_eq!(Page::from_key(page.key()), Some(page));
        }
        assert_eq!(Page::from_key("reports"), None);
    }

    #[test]
    fn test_page_from_search() {
        assert_eq!(page_from_search("?active=olap"), Some(Page::Olap));
        assert_eq!(page_from_search("active=chatbot&x=1"), Some(Page::Chatbot));
        assert_eq!(page_from_search(""), None);
        assert_eq!(page_from_search("?active=unknown"), None);
    }

    #[test]
    fn test_search_for_page() {
        assert_eq!(search_for_page(Page::Analytics), "?active=analytics");
    }
}
