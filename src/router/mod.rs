// ============================================================================
// ROUTER - Resolución de paths + guard + redirecciones
// ============================================================================

pub mod guard;
pub mod history;
pub mod matcher;
pub mod routes;

use std::cell::Cell;
use std::rc::Rc;
use crate::models::RouteDescriptor;
use crate::state::SessionStore;
use crate::utils::{HOME_PATH, LOGIN_PATH, MAX_REDIRECTS};

pub use guard::{evaluate, GuardDecision, GuardStep, NavigationGuard};
pub use matcher::{find_route, normalize_path, Params};
pub use routes::{default_routes, not_found_route};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouterError {
    #[error("Too many redirects while navigating to {0}")]
    TooManyRedirects(String),
}

/// Ruta final tras pasar el guard
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedRoute {
    pub descriptor: RouteDescriptor,
    /// Path normalizado que se muestra en la barra de direcciones
    pub path: String,
    pub params: Params,
    /// Path pedido originalmente si hubo redirección
    pub redirected_from: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Navigation {
    Resolved(ResolvedRoute),
    /// Una navegación más reciente empezó mientras esta esperaba
    Superseded,
}

#[derive(Clone)]
pub struct Router {
    routes: Rc<Vec<RouteDescriptor>>,
    not_found: RouteDescriptor,
    guard: NavigationGuard,
    sequence: Rc<Cell<u64>>,
}

impl Router {
    pub fn new(routes: Vec<RouteDescriptor>, session: SessionStore) -> Self {
        Self {
            routes: Rc::new(routes),
            not_found: not_found_route(),
            guard: NavigationGuard::new(session),
            sequence: Rc::new(Cell::new(0)),
        }
    }

    pub fn routes(&self) -> &[RouteDescriptor] {
        &self.routes
    }

    /// Ruta que coincide con el path (o NotFound), sin pasar por el guard
    pub fn resolve(&self, path: &str) -> (RouteDescriptor, Params) {
        match find_route(&self.routes, path) {
            Some((route, params)) => (route.clone(), params),
            None => (self.not_found.clone(), Params::new()),
        }
    }

    pub async fn navigate(&self, path: &str) -> Result<Navigation, RouterError> {
        let id = self.sequence.get() + 1;
        self.sequence.set(id);

        let requested = normalize_path(path).to_string();
        let mut target = requested.clone();

        for _ in 0..=MAX_REDIRECTS {
            let (descriptor, params) = self.resolve(&target);
            let decision = self.guard.check(&descriptor.meta).await;

            if self.sequence.get() != id {
                log::info!("⏭️ [ROUTER] Navegación a {} reemplazada por otra", requested);
                return Ok(Navigation::Superseded);
            }

            let redirect = match decision {
                GuardDecision::Allow => {
                    log::debug!("✅ [ROUTER] {} -> {:?}", target, descriptor.view);
                    let redirected_from = (target != requested).then(|| requested.clone());
                    return Ok(Navigation::Resolved(ResolvedRoute {
                        descriptor,
                        path: target,
                        params,
                        redirected_from,
                    }));
                }
                GuardDecision::RedirectToLogin => LOGIN_PATH,
                GuardDecision::RedirectToHome => HOME_PATH,
            };
            log::info!("↪️ [ROUTER] {} redirigido a {}", target, redirect);
            target = redirect.to_string();
        }

        log::error!("❌ [ROUTER] Demasiadas redirecciones desde {}", requested);
        Err(RouterError::TooManyRedirects(requested))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, RouteMeta, View};
    use crate::services::mock_api::{unauthorized, user, MockAuthApi};
    use crate::utils::{MemoryStorage, TokenStorage, STORAGE_KEY_ACCESS_TOKEN};

    fn router_with(api: MockAuthApi, token: Option<&str>) -> (Router, SessionStore, Rc<MockAuthApi>) {
        let storage = Rc::new(MemoryStorage::new());
        if let Some(token) = token {
            storage.set(STORAGE_KEY_ACCESS_TOKEN, token).unwrap();
        }
        let api = Rc::new(api);
        let session = SessionStore::new(api.clone(), storage);
        (Router::new(default_routes(), session.clone()), session, api)
    }

    fn resolved(navigation: Navigation) -> ResolvedRoute {
        match navigation {
            Navigation::Resolved(route) => route,
            Navigation::Superseded => panic!("navigation was superseded"),
        }
    }

    #[tokio::test]
    async fn anonymous_user_lands_on_login() {
        let (router, _, _) = router_with(MockAuthApi::new(), None);
        let route = resolved(router.navigate("/payroll").await.unwrap());
        assert_eq!(route.descriptor.view, View::Login);
        assert_eq!(route.path, "/login");
        assert_eq!(route.redirected_from.as_deref(), Some("/payroll"));
    }

    #[tokio::test]
    async fn dispatcher_is_sent_home_from_users() {
        let (router, _, _) = router_with(MockAuthApi::new().with_me(Ok(user("d", Role::Dispatcher))), Some("A"));
        let route = resolved(router.navigate("/users").await.unwrap());
        assert_eq!(route.path, "/");
        assert_eq!(route.descriptor.view, View::Dashboard);
    }

    #[tokio::test]
    async fn admin_reaches_users() {
        let (router, _, _) = router_with(MockAuthApi::new().with_me(Ok(user("a", Role::Admin))), Some("A"));
        let route = resolved(router.navigate("/users").await.unwrap());
        assert_eq!(route.descriptor.view, View::Users);
        assert_eq!(route.redirected_from, None);
    }

    #[tokio::test]
    async fn expired_token_ends_on_login_logged_out() {
        let (router, session, _) = router_with(MockAuthApi::new().with_me(Err(unauthorized())), Some("A"));
        let route = resolved(router.navigate("/settings").await.unwrap());
        assert_eq!(route.descriptor.view, View::Login);
        assert!(!session.is_logged_in());
    }

    #[tokio::test]
    async fn object_details_keep_params() {
        let (router, _, _) = router_with(MockAuthApi::new(), Some("A"));
        let route = resolved(router.navigate("/objects/17?tab=acts").await.unwrap());
        assert_eq!(route.descriptor.view, View::ObjectDetails);
        assert_eq!(route.params.get("id").map(String::as_str), Some("17"));
        assert_eq!(route.path, "/objects/17");
    }

    #[tokio::test]
    async fn unknown_path_is_protected_not_found() {
        let (router, _, _) = router_with(MockAuthApi::new(), None);
        let route = resolved(router.navigate("/does-not-exist").await.unwrap());
        assert_eq!(route.descriptor.view, View::Login);

        let (router, _, _) = router_with(MockAuthApi::new(), Some("A"));
        let route = resolved(router.navigate("/does-not-exist").await.unwrap());
        assert_eq!(route.descriptor.view, View::NotFound);
    }

    #[tokio::test]
    async fn redirect_loop_is_bounded() {
        // Home exige admin: dispatcher rebota en "/" indefinidamente
        let routes = vec![RouteDescriptor::new("/", "Dashboard", View::Dashboard, RouteMeta::role(Role::Admin))];
        let storage = Rc::new(MemoryStorage::new());
        storage.set(STORAGE_KEY_ACCESS_TOKEN, "A").unwrap();
        let session = SessionStore::new(Rc::new(MockAuthApi::new()), storage);
        let router = Router::new(routes, session);

        assert_eq!(
            router.navigate("/").await,
            Err(RouterError::TooManyRedirects("/".to_string()))
        );
    }

    #[tokio::test]
    async fn newer_navigation_supersedes_pending_one() {
        let (router, _, api) = router_with(MockAuthApi::new(), Some("A"));
        let gate = api.gate_me();

        let second = async {
            tokio::task::yield_now().await;
            // Login es pública, resuelve sin esperar el perfil
            let nav = router.navigate("/login").await;
            gate.notify_one();
            nav
        };
        let (first, second) = tokio::join!(router.navigate("/carriers"), second);

        assert_eq!(first.unwrap(), Navigation::Superseded);
        assert_eq!(resolved(second.unwrap()).descriptor.view, View::Login);
    }

    #[tokio::test]
    async fn overlapping_navigations_fetch_profile_once() {
        let (router, session, api) = router_with(MockAuthApi::new(), Some("A"));
        let gate = api.gate_me();

        let second = async {
            tokio::task::yield_now().await;
            let release = async {
                tokio::task::yield_now().await;
                gate.notify_one();
            };
            let (nav, ()) = tokio::join!(router.navigate("/payroll"), release);
            nav
        };
        let (first, second) = tokio::join!(router.navigate("/carriers"), second);

        assert_eq!(api.me_calls(), 1);
        assert!(session.user().is_some());
        assert_eq!(first.unwrap(), Navigation::Superseded);
        assert_eq!(resolved(second.unwrap()).descriptor.view, View::Payroll);
    }
}
