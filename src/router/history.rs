// ============================================================================
// HISTORY - Sincroniza la barra de direcciones con el router (History API)
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{window, History, PopStateEvent};

/// Qué hacer con la entrada de historial tras una navegación resuelta
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HistoryUpdate {
    Push,
    Replace,
    Keep,
}

/// `push`: navegación lanzada por la app (clic, login, logout).
/// Sin `push` la URL ya está en la barra (carga inicial o back/forward):
/// si la ruta fue redirigida se sustituye esa entrada, para que "atrás"
/// no vuelva a una página que redirige otra vez.
pub fn history_update(push: bool, redirected: bool) -> HistoryUpdate {
    match (push, redirected) {
        (true, _) => HistoryUpdate::Push,
        (false, true) => HistoryUpdate::Replace,
        (false, false) => HistoryUpdate::Keep,
    }
}

pub struct BrowserHistory {
    history: History,
}

impl BrowserHistory {
    pub fn new() -> Result<Self, JsValue> {
        let history = window()
            .ok_or_else(|| JsValue::from_str("No window"))?
            .history()?;
        Ok(Self { history })
    }

    /// Path actual (pathname + query)
    pub fn current_path() -> String {
        window()
            .map(|w| w.location())
            .and_then(|loc| {
                let pathname = loc.pathname().ok()?;
                let search = loc.search().unwrap_or_default();
                Some(format!("{}{}", pathname, search))
            })
            .unwrap_or_else(|| "/".to_string())
    }

    pub fn push(&self, path: &str) -> Result<(), JsValue> {
        if Self::current_path() == path {
            return Ok(());
        }
        self.history.push_state_with_url(&JsValue::NULL, "", Some(path))
    }

    pub fn replace(&self, path: &str) -> Result<(), JsValue> {
        self.history.replace_state_with_url(&JsValue::NULL, "", Some(path))
    }

    pub fn apply(&self, update: HistoryUpdate, path: &str) -> Result<(), JsValue> {
        match update {
            HistoryUpdate::Push => self.push(path),
            HistoryUpdate::Replace => self.replace(path),
            HistoryUpdate::Keep => Ok(()),
        }
    }

    /// Registrar listener de back/forward.
    /// Listener global: registrar UNA sola vez al iniciar la app.
    pub fn on_pop<F>(handler: F) -> Result<(), JsValue>
    where
        F: Fn(String) + 'static,
    {
        let win = window().ok_or_else(|| JsValue::from_str("No window"))?;
        let closure = Closure::wrap(Box::new(move |_e: PopStateEvent| {
            handler(Self::current_path());
        }) as Box<dyn FnMut(PopStateEvent)>);
        win.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }
}
