// ============================================================================
// AUTH API - Contrato con el backend de autenticación
// ============================================================================

use async_trait::async_trait;
use crate::models::{TokenResponse, UserProfile};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("No token available")]
    MissingToken,
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Http { status: 401 | 403, .. })
    }

    /// Texto para mostrar en el formulario de login
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Http { message, .. } if !message.is_empty() => message.clone(),
            ApiError::Http { status, .. } => format!("Ошибка сервера ({})", status),
            ApiError::Network(_) => "Сервер недоступен".to_string(),
            other => other.to_string(),
        }
    }
}

/// Endpoints `/auth/*`. Sin `Send`: todo corre en el hilo principal del navegador.
#[async_trait(?Send)]
pub trait AuthApi {
    /// `POST /auth/login`
    async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, ApiError>;
    /// `GET /auth/me` con `Authorization: Bearer <access_token>`
    async fn me(&self, access_token: &str) -> Result<UserProfile, ApiError>;
    /// `POST /auth/refresh`
    async fn refresh(&self, refresh_token: &str) -> Result<TokenResponse, ApiError>;
}
