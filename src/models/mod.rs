pub mod auth;
pub mod route;

pub use auth::{ErrorDetail, LoginRequest, RefreshRequest, Role, TokenResponse, UserProfile};
pub use route::{RouteDescriptor, RouteMeta, View};
