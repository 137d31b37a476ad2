// ============================================================================
// APP - Arranque: storage, API, session store, router, history y render
// ============================================================================

use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{append_child, get_element_by_id, release_listeners, set_inner_html};
use crate::router::history::BrowserHistory;
use crate::router::{default_routes, Router};
use crate::services::{ApiClient, AuthApi};
use crate::state::{AppState, SessionStore};
use crate::utils::{LocalStorage, MemoryStorage, TokenStorage};
use crate::views::render_app;

pub struct App {
    state: AppState,
    root: Element,
}

impl App {
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id("app")
            .ok_or_else(|| JsValue::from_str("No #app element found"))?;

        let storage: Rc<dyn TokenStorage> = match LocalStorage::open() {
            Some(storage) => Rc::new(storage),
            None => {
                log::warn!("⚠️ [APP] localStorage no disponible, sesión solo en memoria");
                Rc::new(MemoryStorage::new())
            }
        };
        let api: Rc<dyn AuthApi> = Rc::new(ApiClient::new());
        let session = SessionStore::new(api, storage);
        let router = Router::new(default_routes(), session.clone());

        let history = match BrowserHistory::new() {
            Ok(history) => Some(history),
            Err(e) => {
                log::warn!("⚠️ [APP] History API no disponible: {:?}", e);
                None
            }
        };
        let state = AppState::new(session, router, history);

        // Batchear re-renders de múltiples cambios del store
        state.session.subscribe(|| {
            use gloo_timers::callback::Timeout;
            Timeout::new(0, crate::rerender_app).forget();
        });

        Ok(Self { state, root })
    }

    /// Primera navegación + back/forward. Llamar UNA vez.
    pub fn start(&self) -> Result<(), JsValue> {
        let initial = BrowserHistory::current_path();
        log::info!("🧭 [APP] Navegación inicial a {}", initial);
        self.state.navigate_from_history(&initial);

        let state = self.state.clone();
        BrowserHistory::on_pop(move |path| state.navigate_from_history(&path))
    }

    pub fn render(&mut self) -> Result<(), JsValue> {
        release_listeners();
        set_inner_html(&self.root, "");
        let view = render_app(&self.state)?;
        append_child(&self.root, &view)
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }
}
