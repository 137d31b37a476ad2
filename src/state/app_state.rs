// ============================================================================
// APP STATE - Estado compartido de la UI (Rc<RefCell>, hilo principal)
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use crate::router::history::{history_update, BrowserHistory};
use crate::router::{Navigation, ResolvedRoute, Router, RouterError};
use crate::services::ApiError;
use crate::state::SessionStore;
use crate::utils::{HOME_PATH, LOGIN_PATH};

#[derive(Clone)]
pub struct AppState {
    pub session: SessionStore,
    pub router: Router,
    pub current: Rc<RefCell<Option<ResolvedRoute>>>,
    pub login_error: Rc<RefCell<Option<String>>>,
    pub login_pending: Rc<RefCell<bool>>,
    /// Último usuario enviado, para rellenar el formulario tras un rechazo
    pub login_username: Rc<RefCell<String>>,
    history: Option<Rc<BrowserHistory>>,
}

impl AppState {
    pub fn new(session: SessionStore, router: Router, history: Option<BrowserHistory>) -> Self {
        Self {
            session,
            router,
            current: Rc::new(RefCell::new(None)),
            login_error: Rc::new(RefCell::new(None)),
            login_pending: Rc::new(RefCell::new(false)),
            login_username: Rc::new(RefCell::new(String::new())),
            history: history.map(Rc::new),
        }
    }

    pub fn current_route(&self) -> Option<ResolvedRoute> {
        self.current.borrow().clone()
    }

    /// Navega y aplica el resultado. `None` si la navegación quedó reemplazada.
    pub async fn go(&self, path: &str) -> Result<Option<ResolvedRoute>, RouterError> {
        match self.router.navigate(path).await? {
            Navigation::Resolved(route) => {
                *self.current.borrow_mut() = Some(route.clone());
                Ok(Some(route))
            }
            Navigation::Superseded => Ok(None),
        }
    }

    /// Destino tras un login correcto: el path que provocó la redirección a login
    pub fn post_login_target(&self) -> String {
        self.current
            .borrow()
            .as_ref()
            .and_then(|route| route.redirected_from.clone())
            .filter(|path| path != LOGIN_PATH)
            .unwrap_or_else(|| HOME_PATH.to_string())
    }

    /// Login desde el formulario; devuelve el path al que hay que ir
    pub async fn submit_login(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let target = self.post_login_target();
        *self.login_username.borrow_mut() = username.to_string();
        *self.login_error.borrow_mut() = None;
        *self.login_pending.borrow_mut() = true;

        let result = self.session.login(username, password).await;

        *self.login_pending.borrow_mut() = false;
        match result {
            Ok(()) => Ok(target),
            Err(e) => {
                *self.login_error.borrow_mut() = Some(e.user_message());
                Err(e)
            }
        }
    }

    // ---------------------------------------------------------------------
    // Acciones lanzadas desde la UI (spawn_local + re-render)
    // ---------------------------------------------------------------------

    pub fn navigate(&self, path: &str) {
        let state = self.clone();
        let path = path.to_string();
        spawn_local(async move {
            state.navigate_now(&path, true).await;
        });
    }

    /// Back/forward: la URL ya cambió, solo se reemplaza si hubo redirección
    pub fn navigate_from_history(&self, path: &str) {
        let state = self.clone();
        let path = path.to_string();
        spawn_local(async move {
            state.navigate_now(&path, false).await;
        });
    }

    async fn navigate_now(&self, path: &str, push: bool) {
        match self.go(path).await {
            Ok(Some(route)) => {
                if let Some(history) = &self.history {
                    let update = history_update(push, route.redirected_from.is_some());
                    if let Err(e) = history.apply(update, &route.path) {
                        log::warn!("⚠️ [APP] No se pudo actualizar la URL: {:?}", e);
                    }
                }
                crate::rerender_app();
            }
            Ok(None) => {}
            Err(e) => log::error!("❌ [APP] {}", e),
        }
    }

    pub fn login(&self, username: String, password: String) {
        // Botón deshabilitado inmediatamente
        *self.login_pending.borrow_mut() = true;
        crate::rerender_app();
        let state = self.clone();
        spawn_local(async move {
            match state.submit_login(&username, &password).await {
                Ok(target) => state.navigate_now(&target, true).await,
                Err(_) => crate::rerender_app(),
            }
        });
    }

    pub fn logout(&self) {
        self.session.logout();
        self.navigate(LOGIN_PATH);
    }
}
