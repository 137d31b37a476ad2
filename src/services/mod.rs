pub mod auth_api;
pub mod api_client;
#[cfg(test)]
pub mod mock_api;

pub use auth_api::{ApiError, AuthApi};
pub use api_client::ApiClient;
