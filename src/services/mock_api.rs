// Doble de prueba de AuthApi (solo tests)

use std::cell::RefCell;
use std::rc::Rc;
use async_trait::async_trait;
use tokio::sync::Notify;
use crate::models::{Role, TokenResponse, UserProfile};
use crate::services::auth_api::{ApiError, AuthApi};
use crate::utils::{TokenStorage, STORAGE_KEY_ACCESS_TOKEN};

pub fn tokens(access: &str, refresh: &str) -> TokenResponse {
    TokenResponse {
        access_token: access.to_string(),
        refresh_token: refresh.to_string(),
        token_type: "bearer".to_string(),
    }
}

pub fn user(username: &str, role: Role) -> UserProfile {
    UserProfile {
        id: 1,
        username: username.to_string(),
        full_name: format!("{} (test)", username),
        role,
        is_active: true,
        employee_id: None,
    }
}

pub fn unauthorized() -> ApiError {
    ApiError::Http { status: 401, message: "Invalid token".to_string() }
}

pub struct MockAuthApi {
    pub login_result: RefCell<Result<TokenResponse, ApiError>>,
    pub me_result: RefCell<Result<UserProfile, ApiError>>,
    pub refresh_result: RefCell<Result<TokenResponse, ApiError>>,
    /// Registro de llamadas: "login:<user>", "me:<token>", "refresh:<token>"
    pub calls: RefCell<Vec<String>>,
    /// Valor de `access_token` en storage visto al entrar en `me()`
    pub stored_token_at_me: RefCell<Vec<Option<String>>>,
    watched_storage: RefCell<Option<Rc<dyn TokenStorage>>>,
    me_gate: RefCell<Option<Rc<Notify>>>,
}

impl MockAuthApi {
    pub fn new() -> Self {
        Self {
            login_result: RefCell::new(Ok(tokens("A", "R"))),
            me_result: RefCell::new(Ok(user("alice", Role::Dispatcher))),
            refresh_result: RefCell::new(Ok(tokens("A2", "R2"))),
            calls: RefCell::new(Vec::new()),
            stored_token_at_me: RefCell::new(Vec::new()),
            watched_storage: RefCell::new(None),
            me_gate: RefCell::new(None),
        }
    }

    pub fn with_me(self, result: Result<UserProfile, ApiError>) -> Self {
        *self.me_result.borrow_mut() = result;
        self
    }

    pub fn with_login(self, result: Result<TokenResponse, ApiError>) -> Self {
        *self.login_result.borrow_mut() = result;
        self
    }

    pub fn with_refresh(self, result: Result<TokenResponse, ApiError>) -> Self {
        *self.refresh_result.borrow_mut() = result;
        self
    }

    pub fn watch_storage(&self, storage: Rc<dyn TokenStorage>) {
        *self.watched_storage.borrow_mut() = Some(storage);
    }

    /// `me()` queda suspendido hasta `gate.notify_one()`
    pub fn gate_me(&self) -> Rc<Notify> {
        let gate = Rc::new(Notify::new());
        *self.me_gate.borrow_mut() = Some(gate.clone());
        gate
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn me_calls(&self) -> usize {
        self.calls.borrow().iter().filter(|c| c.starts_with("me:")).count()
    }
}

#[async_trait(?Send)]
impl AuthApi for MockAuthApi {
    async fn login(&self, username: &str, _password: &str) -> Result<TokenResponse, ApiError> {
        self.calls.borrow_mut().push(format!("login:{}", username));
        self.login_result.borrow().clone()
    }

    async fn me(&self, access_token: &str) -> Result<UserProfile, ApiError> {
        self.calls.borrow_mut().push(format!("me:{}", access_token));
        let seen = self
            .watched_storage
            .borrow()
            .as_ref()
            .and_then(|s| s.get(STORAGE_KEY_ACCESS_TOKEN));
        self.stored_token_at_me.borrow_mut().push(seen);

        let gate = self.me_gate.borrow().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.me_result.borrow().clone()
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenResponse, ApiError> {
        self.calls.borrow_mut().push(format!("refresh:{}", refresh_token));
        self.refresh_result.borrow().clone()
    }
}
