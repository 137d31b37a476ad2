// ============================================================================
// SESSION STORE - Token + perfil del usuario actual
// ============================================================================
// El token es la única fuente de verdad para "logueado". El perfil vive solo
// en memoria y se pide bajo demanda (guard o login).
// Nunca se mantiene un borrow a través de un `.await`.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use futures_util::future::{FutureExt, LocalBoxFuture, Shared};
use crate::models::{Role, TokenResponse, UserProfile};
use crate::services::{ApiError, AuthApi};
use crate::state::reactivity::Subscribers;
use crate::utils::{TokenStorage, STORAGE_KEY_ACCESS_TOKEN, STORAGE_KEY_REFRESH_TOKEN};

type ProfileRequest = Shared<LocalBoxFuture<'static, ()>>;

/// Vista inmutable que consume el guard
#[derive(Clone, Debug, PartialEq)]
pub struct SessionSnapshot {
    pub logged_in: bool,
    pub user: Option<UserProfile>,
}

#[derive(Clone)]
pub struct SessionStore {
    api: Rc<dyn AuthApi>,
    storage: Rc<dyn TokenStorage>,
    token: Rc<RefCell<String>>,
    user: Rc<RefCell<Option<UserProfile>>>,
    /// `/auth/me` en curso y el token con el que se pidió
    profile_request: Rc<RefCell<Option<(String, ProfileRequest)>>>,
    subscribers: Subscribers,
}

impl SessionStore {
    /// Crea el store sembrando el token desde storage
    pub fn new(api: Rc<dyn AuthApi>, storage: Rc<dyn TokenStorage>) -> Self {
        let token = storage.get(STORAGE_KEY_ACCESS_TOKEN).unwrap_or_default();
        if !token.is_empty() {
            log::info!("💾 [AUTH] Token encontrado en storage, perfil pendiente");
        }
        Self {
            api,
            storage,
            token: Rc::new(RefCell::new(token)),
            user: Rc::new(RefCell::new(None)),
            profile_request: Rc::new(RefCell::new(None)),
            subscribers: Subscribers::new(),
        }
    }

    // ---------------------------------------------------------------------
    // Flags derivados (se recalculan en cada acceso)
    // ---------------------------------------------------------------------

    pub fn is_logged_in(&self) -> bool {
        !self.token.borrow().is_empty()
    }

    pub fn has_role(&self, role: &Role) -> bool {
        self.user.borrow().as_ref().is_some_and(|u| &u.role == role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(&Role::Admin)
    }

    pub fn is_dispatcher(&self) -> bool {
        self.has_role(&Role::Dispatcher)
    }

    pub fn is_accountant(&self) -> bool {
        self.has_role(&Role::Accountant)
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.user.borrow().clone()
    }

    pub fn token(&self) -> Option<String> {
        let token = self.token.borrow();
        if token.is_empty() {
            None
        } else {
            Some(token.clone())
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            logged_in: self.is_logged_in(),
            user: self.user(),
        }
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.subscribers.subscribe(callback);
    }

    // ---------------------------------------------------------------------
    // Operaciones
    // ---------------------------------------------------------------------

    /// Login con credenciales. Si falla, el estado previo no se toca.
    /// Si el login va bien pero el perfil no carga, la sesión termina cerrada
    /// (ver `fetch_user`) y el resultado sigue siendo `Ok`.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), ApiError> {
        log::info!("🔐 [AUTH] Login de {}", username);

        let tokens = match self.api.login(username, password).await {
            Ok(tokens) => tokens,
            Err(e) => {
                log::warn!("❌ [AUTH] Login rechazado para {}: {}", username, e);
                return Err(e);
            }
        };

        self.store_tokens(&tokens);
        // El perfil anterior pertenecía a otro token
        *self.user.borrow_mut() = None;
        self.subscribers.notify();

        log::info!("✅ [AUTH] Tokens guardados, cargando perfil...");
        self.fetch_user().await;
        Ok(())
    }

    /// Pide el perfil con el token actual. Cualquier fallo cierra la sesión.
    /// Llamadas concurrentes para el mismo token comparten una sola petición.
    pub async fn fetch_user(&self) {
        let Some(token) = self.token() else {
            log::warn!("⚠️ [AUTH] fetch_user sin token, cerrando sesión");
            self.logout();
            return;
        };

        let pending = self
            .profile_request
            .borrow()
            .as_ref()
            .filter(|(pending_token, _)| *pending_token == token)
            .map(|(_, request)| request.clone());
        if let Some(request) = pending {
            log::debug!("⏳ [AUTH] /auth/me ya en curso, esperando la misma petición");
            request.await;
            return;
        }

        let store = self.clone();
        let request_token = token.clone();
        let request = async move {
            store.load_profile(&request_token).await;
            let mut slot = store.profile_request.borrow_mut();
            if slot.as_ref().is_some_and(|(t, _)| *t == request_token) {
                *slot = None;
            }
        }
        .boxed_local()
        .shared();

        *self.profile_request.borrow_mut() = Some((token, request.clone()));
        request.await;
    }

    async fn load_profile(&self, token: &str) {
        let result = self.api.me(token).await;

        // La sesión cambió mientras esperábamos (logout o nuevo login)
        if self.token().as_deref() != Some(token) {
            log::info!("⏭️ [AUTH] Perfil descartado: el token cambió durante la petición");
            return;
        }

        match result {
            Ok(user) => {
                log::info!("👤 [AUTH] Perfil cargado: {} ({})", user.username, user.role);
                *self.user.borrow_mut() = Some(user);
                self.subscribers.notify();
            }
            Err(e) if e.is_unauthorized() => {
                log::info!("🔑 [AUTH] Token rechazado por el backend ({}), cerrando sesión", e);
                self.logout();
            }
            Err(e) => {
                log::warn!("❌ [AUTH] No se pudo cargar el perfil ({}), cerrando sesión", e);
                self.logout();
            }
        }
    }

    /// Rota los tokens con el refresh token guardado. Cualquier fallo cierra la sesión.
    pub async fn refresh(&self) -> Result<(), ApiError> {
        let refresh_token = self
            .storage
            .get(STORAGE_KEY_REFRESH_TOKEN)
            .filter(|t| !t.is_empty());
        let Some(refresh_token) = refresh_token else {
            log::warn!("⚠️ [AUTH] Sin refresh token, cerrando sesión");
            self.logout();
            return Err(ApiError::MissingToken);
        };

        match self.api.refresh(&refresh_token).await {
            Ok(tokens) => {
                self.store_tokens(&tokens);
                self.subscribers.notify();
                log::info!("✅ [AUTH] Tokens renovados");
                Ok(())
            }
            Err(e) => {
                log::warn!("❌ [AUTH] Refresh rechazado ({}), cerrando sesión", e);
                self.logout();
                Err(e)
            }
        }
    }

    /// Limpia perfil, token y storage. Idempotente.
    pub fn logout(&self) {
        log::info!("👋 [AUTH] Logout");
        *self.user.borrow_mut() = None;
        self.token.borrow_mut().clear();
        for key in [STORAGE_KEY_ACCESS_TOKEN, STORAGE_KEY_REFRESH_TOKEN] {
            if let Err(e) = self.storage.remove(key) {
                log::error!("❌ [AUTH] {}", e);
            }
        }
        self.subscribers.notify();
    }

    fn store_tokens(&self, tokens: &TokenResponse) {
        for (key, value) in [
            (STORAGE_KEY_ACCESS_TOKEN, &tokens.access_token),
            (STORAGE_KEY_REFRESH_TOKEN, &tokens.refresh_token),
        ] {
            if let Err(e) = self.storage.set(key, value) {
                log::error!("❌ [AUTH] {}", e);
            }
        }
        *self.token.borrow_mut() = tokens.access_token.clone();
    }
}
