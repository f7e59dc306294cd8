//! Session-scoped state: the resolved current user.
//!
//! One `SessionContext` lives for the duration of a client session and is
//! shared by reference with every dependent (guards, nav, in-page checks).
//! It resolves "who am I" once on boot; until that resolves, dependents
//! must treat the user as unknown — not as "no user" — and must not
//! redirect.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::gateway::AuthGateway;
use crate::model::{AdminRole, AdminUser};
use crate::rbac;
use crate::store::TokenStore;

/// Resolution state of the current session.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthStatus {
    /// Bootstrap has not resolved yet. Unknown is not "no user".
    Loading,
    /// Resolved: no authenticated user.
    Unauthenticated,
    /// Resolved: this user.
    Authenticated(AdminUser),
}

#[derive(Debug, Default)]
struct SessionState {
    user: Option<AdminUser>,
    resolved: bool,
    loading: bool,
    error: Option<String>,
}

/// Shared session state container.
pub struct SessionContext {
    gateway: Arc<AuthGateway>,
    state: RwLock<SessionState>,
    /// Monotonic sequence for identity resolutions; a resolution older
    /// than the latest issued one is discarded instead of clobbering
    /// newer state.
    resolve_seq: AtomicU64,
    bootstrapped: AtomicBool,
}

impl SessionContext {
    pub fn new(gateway: Arc<AuthGateway>) -> Arc<Self> {
        Arc::new(Self {
            gateway,
            state: RwLock::new(SessionState { loading: true, ..Default::default() }),
            resolve_seq: AtomicU64::new(0),
            bootstrapped: AtomicBool::new(false),
        })
    }

    /// Resolve the current user once. Subsequent calls are no-ops; the
    /// single fetch carries the one-refresh-one-retry policy of
    /// [`AuthGateway::current_user_with_refresh`].
    pub async fn bootstrap(&self, store: &mut dyn TokenStore) {
        if self.bootstrapped.swap(true, Ordering::SeqCst) {
            return;
        }

        let seq = self.begin_resolution();
        let user = self.gateway.current_user_with_refresh(store).await;
        self.complete_resolution(seq, user);
    }

    /// Start an identity resolution, returning its sequence number.
    pub fn begin_resolution(&self) -> u64 {
        self.resolve_seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Apply a finished resolution. Returns false (and changes nothing)
    /// when a newer resolution was issued in the meantime.
    pub fn complete_resolution(&self, seq: u64, user: Option<AdminUser>) -> bool {
        if seq != self.resolve_seq.load(Ordering::SeqCst) {
            debug!("discarding stale session resolution (seq {})", seq);
            return false;
        }
        let mut state = self.state.write().unwrap();
        state.user = user;
        state.resolved = true;
        state.loading = false;
        true
    }

    /// Current resolution state.
    pub fn snapshot(&self) -> AuthStatus {
        let state = self.state.read().unwrap();
        if !state.resolved {
            return AuthStatus::Loading;
        }
        match &state.user {
            Some(user) => AuthStatus::Authenticated(user.clone()),
            None => AuthStatus::Unauthenticated,
        }
    }

    pub fn user(&self) -> Option<AdminUser> {
        self.state.read().unwrap().user.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().unwrap().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.read().unwrap().error.clone()
    }

    /// Replace the resolved user (e.g. after a successful login).
    pub fn set_user(&self, user: Option<AdminUser>) {
        let mut state = self.state.write().unwrap();
        state.user = user;
        state.resolved = true;
        state.loading = false;
        state.error = None;
    }

    /// End the session. The loading flag is cleared on every path out of
    /// here; the gateway guarantees local tokens are cleared regardless
    /// of backend outcome.
    pub async fn logout(&self, store: &mut dyn TokenStore) {
        {
            let mut state = self.state.write().unwrap();
            state.loading = true;
        }

        self.gateway.logout(store).await;

        let mut state = self.state.write().unwrap();
        state.user = None;
        state.error = None;
        state.resolved = true;
        state.loading = false;
    }

    /// Whether the current user holds `permission`. False with no user;
    /// unconditionally true for super_admin.
    pub fn has_permission(&self, permission: &str) -> bool {
        match self.user() {
            Some(user) => rbac::role_allows(user.role, permission),
            None => false,
        }
    }

    /// Whether the current user's role is one of `roles`. Exact
    /// membership — no wildcard, no hierarchy.
    pub fn can_access(&self, roles: &[AdminRole]) -> bool {
        match self.user() {
            Some(user) => roles.contains(&user.role),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use axum::extract::State;
    use axum::http::HeaderMap;
    use axum::routing::get;
    use axum::{Json, Router};
    use reqwest::StatusCode;

    use super::*;
    use crate::config::{GateConfig, SESSION_COOKIE};
    use crate::store::MemoryTokenStore;

    fn user(role: AdminRole) -> AdminUser {
        AdminUser {
            id: "u1".into(),
            email: "a@b.co".into(),
            first_name: "Admin".into(),
            last_name: "User".into(),
            role,
            avatar: None,
        }
    }

    async fn start_me_backend(me_calls: Arc<AtomicUsize>) -> String {
        async fn me(
            State(calls): State<Arc<AtomicUsize>>,
            headers: HeaderMap,
        ) -> (StatusCode, Json<serde_json::Value>) {
            calls.fetch_add(1, Ordering::SeqCst);
            let ok = headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .is_some_and(|v| v == "Bearer good-token");
            if ok {
                (
                    StatusCode::OK,
                    Json(serde_json::json!({
                        "user": {"id": "u1", "email": "a@b.co", "role": "staff"}
                    })),
                )
            } else {
                (StatusCode::UNAUTHORIZED, Json(serde_json::json!({})))
            }
        }

        let app = Router::new()
            .route("/admin/users/me", get(me))
            .with_state(me_calls);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn offline_context() -> Arc<SessionContext> {
        // Nothing listens here; only used by tests that stay local.
        let gateway = AuthGateway::new(GateConfig {
            backend_url: "http://127.0.0.1:9".to_string(),
            ..Default::default()
        });
        SessionContext::new(Arc::new(gateway))
    }

    #[tokio::test]
    async fn bootstrap_resolves_user_and_fetches_exactly_once() {
        let me_calls = Arc::new(AtomicUsize::new(0));
        let base_url = start_me_backend(me_calls.clone()).await;
        let gateway = AuthGateway::new(GateConfig { backend_url: base_url, ..Default::default() });
        let session = SessionContext::new(Arc::new(gateway));
        let mut store = MemoryTokenStore::with_token(SESSION_COOKIE, "good-token");

        assert_eq!(session.snapshot(), AuthStatus::Loading);

        session.bootstrap(&mut store).await;
        assert!(matches!(session.snapshot(), AuthStatus::Authenticated(_)));

        session.bootstrap(&mut store).await;
        session.bootstrap(&mut store).await;
        assert_eq!(me_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn bootstrap_without_token_resolves_unauthenticated() {
        let session = offline_context();
        let mut store = MemoryTokenStore::new();

        session.bootstrap(&mut store).await;
        assert_eq!(session.snapshot(), AuthStatus::Unauthenticated);
        assert!(!session.is_loading());
    }

    #[test]
    fn stale_resolution_is_discarded() {
        let session = offline_context();

        let first = session.begin_resolution();
        let second = session.begin_resolution();

        // The slower, superseded resolution must not clobber state.
        assert!(!session.complete_resolution(first, Some(user(AdminRole::Staff))));
        assert_eq!(session.snapshot(), AuthStatus::Loading);

        assert!(session.complete_resolution(second, None));
        assert_eq!(session.snapshot(), AuthStatus::Unauthenticated);
    }

    #[tokio::test]
    async fn logout_clears_user_and_loading_flag() {
        let session = offline_context();
        session.set_user(Some(user(AdminRole::Manager)));
        let mut store = MemoryTokenStore::with_token(SESSION_COOKIE, "tok");

        session.logout(&mut store).await;
        assert_eq!(session.snapshot(), AuthStatus::Unauthenticated);
        assert!(!session.is_loading());
        assert_eq!(store.read(SESSION_COOKIE), None);
    }

    #[test]
    fn permission_checks_without_user_are_false() {
        let session = offline_context();
        assert!(!session.has_permission("products:read"));
        assert!(!session.can_access(&[AdminRole::Staff]));
    }

    #[test]
    fn super_admin_has_every_permission() {
        let session = offline_context();
        session.set_user(Some(user(AdminRole::SuperAdmin)));
        assert!(session.has_permission("products:read"));
        assert!(session.has_permission("made:up"));
    }

    #[test]
    fn can_access_is_exact_membership() {
        let session = offline_context();
        session.set_user(Some(user(AdminRole::SuperAdmin)));

        // No hierarchy: super_admin is not implicitly a manager.
        assert!(!session.can_access(&[AdminRole::Manager]));
        assert!(session.can_access(&[AdminRole::Manager, AdminRole::SuperAdmin]));
    }

    #[test]
    fn staff_permission_table_membership() {
        let session = offline_context();
        session.set_user(Some(user(AdminRole::Staff)));
        assert!(session.has_permission("orders:read"));
        assert!(!session.has_permission("orders:update"));
    }
}
