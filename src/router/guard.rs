// ============================================================================
// NAVIGATION GUARD - Decide allow / login / home antes de cada navegación
// ============================================================================
// `evaluate` es puro y síncrono. `NavigationGuard::check` lo ejecuta y, si
// falta el perfil, lo pide UNA vez y vuelve a evaluar.
// ============================================================================

use crate::models::RouteMeta;
use crate::state::{SessionSnapshot, SessionStore};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectToLogin,
    RedirectToHome,
}

/// Resultado de una evaluación; `NeedsProfile` es el punto de suspensión
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardStep {
    Decided(GuardDecision),
    NeedsProfile,
}

pub fn evaluate(meta: &RouteMeta, session: &SessionSnapshot) -> GuardStep {
    if meta.public {
        return GuardStep::Decided(GuardDecision::Allow);
    }
    if !session.logged_in {
        return GuardStep::Decided(GuardDecision::RedirectToLogin);
    }
    let Some(user) = &session.user else {
        return GuardStep::NeedsProfile;
    };
    match &meta.required_role {
        Some(required) if &user.role != required => GuardStep::Decided(GuardDecision::RedirectToHome),
        _ => GuardStep::Decided(GuardDecision::Allow),
    }
}

#[derive(Clone)]
pub struct NavigationGuard {
    session: SessionStore,
}

impl NavigationGuard {
    pub fn new(session: SessionStore) -> Self {
        Self { session }
    }

    pub async fn check(&self, meta: &RouteMeta) -> GuardDecision {
        match evaluate(meta, &self.session.snapshot()) {
            GuardStep::Decided(decision) => decision,
            GuardStep::NeedsProfile => {
                log::debug!("⏳ [GUARD] Perfil no cargado, esperando /auth/me");
                self.session.fetch_user().await;
                match evaluate(meta, &self.session.snapshot()) {
                    GuardStep::Decided(decision) => decision,
                    // Con token y sin perfil tras el fetch: se trata como sesión inválida
                    GuardStep::NeedsProfile => GuardDecision::RedirectToLogin,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;
    use crate::models::Role;
    use crate::router::routes::default_routes;
    use crate::services::mock_api::{unauthorized, user, MockAuthApi};
    use crate::utils::{MemoryStorage, TokenStorage, STORAGE_KEY_ACCESS_TOKEN};

    fn snapshot(logged_in: bool, role: Option<Role>) -> SessionSnapshot {
        SessionSnapshot {
            logged_in,
            user: role.map(|r| user("u", r)),
        }
    }

    fn guard_with(api: MockAuthApi, token: Option<&str>) -> (NavigationGuard, SessionStore, Rc<MockAuthApi>) {
        let storage = Rc::new(MemoryStorage::new());
        if let Some(token) = token {
            storage.set(STORAGE_KEY_ACCESS_TOKEN, token).unwrap();
        }
        let api = Rc::new(api);
        let store = SessionStore::new(api.clone(), storage);
        (NavigationGuard::new(store.clone()), store, api)
    }

    #[test]
    fn public_routes_allow_any_session() {
        let sessions = [
            snapshot(false, None),
            snapshot(true, None),
            snapshot(true, Some(Role::Dispatcher)),
            snapshot(false, Some(Role::Admin)),
        ];
        for route in default_routes().iter().filter(|r| r.meta.public) {
            for session in &sessions {
                assert_eq!(evaluate(&route.meta, session), GuardStep::Decided(GuardDecision::Allow));
            }
        }
    }

    #[test]
    fn protected_routes_without_token_go_to_login() {
        for route in default_routes().iter().filter(|r| !r.meta.public) {
            // Un perfil residual no cuenta sin token
            for session in [snapshot(false, None), snapshot(false, Some(Role::Admin))] {
                assert_eq!(
                    evaluate(&route.meta, &session),
                    GuardStep::Decided(GuardDecision::RedirectToLogin),
                    "{}",
                    route.path
                );
            }
        }
    }

    #[test]
    fn token_without_profile_needs_profile() {
        assert_eq!(evaluate(&RouteMeta::protected(), &snapshot(true, None)), GuardStep::NeedsProfile);
        assert_eq!(evaluate(&RouteMeta::role(Role::Admin), &snapshot(true, None)), GuardStep::NeedsProfile);
    }

    #[test]
    fn role_is_plain_equality() {
        let admin_only = RouteMeta::role(Role::Admin);
        assert_eq!(
            evaluate(&admin_only, &snapshot(true, Some(Role::Dispatcher))),
            GuardStep::Decided(GuardDecision::RedirectToHome)
        );
        assert_eq!(
            evaluate(&admin_only, &snapshot(true, Some(Role::Admin))),
            GuardStep::Decided(GuardDecision::Allow)
        );
        assert_eq!(
            evaluate(&RouteMeta::protected(), &snapshot(true, Some(Role::Accountant))),
            GuardStep::Decided(GuardDecision::Allow)
        );
    }

    #[tokio::test]
    async fn lazy_fetch_feeds_role_check() {
        let (guard, _, api) = guard_with(MockAuthApi::new().with_me(Ok(user("d", Role::Dispatcher))), Some("A"));
        assert_eq!(guard.check(&RouteMeta::role(Role::Admin)).await, GuardDecision::RedirectToHome);
        assert_eq!(api.me_calls(), 1);

        let (guard, _, _) = guard_with(MockAuthApi::new().with_me(Ok(user("a", Role::Admin))), Some("A"));
        assert_eq!(guard.check(&RouteMeta::role(Role::Admin)).await, GuardDecision::Allow);
    }

    #[tokio::test]
    async fn cached_profile_skips_fetch() {
        let (guard, store, api) = guard_with(MockAuthApi::new(), Some("A"));
        store.fetch_user().await;
        assert_eq!(guard.check(&RouteMeta::protected()).await, GuardDecision::Allow);
        assert_eq!(guard.check(&RouteMeta::protected()).await, GuardDecision::Allow);
        assert_eq!(api.me_calls(), 1);
    }

    #[tokio::test]
    async fn failed_fetch_redirects_to_login() {
        let (guard, store, _) = guard_with(MockAuthApi::new().with_me(Err(unauthorized())), Some("A"));

        assert_eq!(guard.check(&RouteMeta::role(Role::Admin)).await, GuardDecision::RedirectToLogin);
        assert!(!store.is_logged_in());
        assert_eq!(store.user(), None);

        // Sin token ya no hay más peticiones
        assert_eq!(guard.check(&RouteMeta::protected()).await, GuardDecision::RedirectToLogin);
    }

    #[tokio::test]
    async fn public_route_never_fetches() {
        let (guard, _, api) = guard_with(MockAuthApi::new(), Some("A"));
        assert_eq!(guard.check(&RouteMeta::public()).await, GuardDecision::Allow);
        assert!(api.calls().is_empty());
    }
}
