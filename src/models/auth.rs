use serde::{Deserialize, Serialize};
use std::fmt;

/// Rol del usuario tal como lo envía el backend (`admin`, `dispatcher`, `accountant`).
/// Los roles desconocidos se conservan tal cual para no romper el login.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    Dispatcher,
    Accountant,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::Dispatcher => "dispatcher",
            Role::Accountant => "accountant",
            Role::Other(tag) => tag,
        }
    }
}

impl From<String> for Role {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "admin" => Role::Admin,
            "dispatcher" => Role::Dispatcher,
            "accountant" => Role::Accountant,
            _ => Role::Other(tag),
        }
    }
}

impl From<&str> for Role {
    fn from(tag: &str) -> Self {
        Role::from(tag.to_string())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Perfil devuelto por `GET /auth/me`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub full_name: String,
    pub role: Role,
    pub is_active: bool,
    #[serde(default)]
    pub employee_id: Option<i64>,
}

impl UserProfile {
    /// Nombre para mostrar en la cabecera
    pub fn display_name(&self) -> &str {
        if self.full_name.trim().is_empty() {
            &self.username
        } else {
            &self.full_name
        }
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Respuesta de `/auth/login` y `/auth/refresh`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Cuerpo de error estándar del backend: `{"detail": "..."}`
#[derive(Clone, PartialEq, Deserialize, Debug)]
pub struct ErrorDetail {
    pub detail: String,
}
