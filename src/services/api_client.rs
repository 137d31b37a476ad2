// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP (Stateless)
// ============================================================================
// NO guarda tokens: el SessionStore pasa el token en cada llamada
// ============================================================================

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use crate::config::CONFIG;
use crate::models::{ErrorDetail, LoginRequest, RefreshRequest, TokenResponse, UserProfile};
use crate::services::auth_api::{ApiError, AuthApi};

/// Cliente API - SOLO comunicación HTTP (stateless)
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new() -> Self {
        Self::with_base_url(CONFIG.backend_url())
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl AuthApi for ApiClient {
    async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        log::info!("🔐 [API] POST /auth/login ({})", username);

        let response = Request::post(&self.url("/auth/login"))
            .json(&request)
            .map_err(|e| ApiError::Serialization(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        parse_response(response).await
    }

    async fn me(&self, access_token: &str) -> Result<UserProfile, ApiError> {
        let response = Request::get(&self.url("/auth/me"))
            .header("Authorization", &bearer(access_token))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        parse_response(response).await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenResponse, ApiError> {
        let request = RefreshRequest {
            refresh_token: refresh_token.to_string(),
        };

        log::info!("🔄 [API] POST /auth/refresh");

        let response = Request::post(&self.url("/auth/refresh"))
            .json(&request)
            .map_err(|e| ApiError::Serialization(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        parse_response(response).await
    }
}

fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if !response.ok() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(http_error(status, &body));
    }
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))
}

/// Usa `detail` del cuerpo si el backend lo envía, si no el texto crudo
fn http_error(status: u16, body: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorDetail>(body)
        .map(|d| d.detail)
        .unwrap_or_else(|_| body.trim().to_string());
    ApiError::Http { status, message }
}
