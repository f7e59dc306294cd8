//! Route guard — role/permission enforcement after identity resolution.
//!
//! A three-state machine driven entirely by the session context's
//! resolution: LOADING until the bootstrap resolves, then either
//! UNAUTHENTICATED (redirect to login, path preserved) or AUTHENTICATED
//! (enforce declared roles/permission, redirect to the unauthorized page
//! on failure, otherwise render). Redirect decisions fire exactly once
//! per failing resolution; re-evaluations of the same failing state
//! render nothing without redirecting again.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::config::GateConfig;
use crate::guard::edge::{login_redirect_target, UNAUTHORIZED_PATH};
use crate::model::AdminRole;
use crate::rbac;
use crate::session::AuthStatus;

/// What the guard decided for one evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session unresolved: render a loading state, do not redirect.
    Loading,
    /// Redirect to login with the current path as return target.
    RedirectToLogin(String),
    /// Redirect to the access-denied page.
    RedirectToUnauthorized(String),
    /// A redirect already fired for this failing state: render nothing.
    Blocked,
    /// All requirements met: render the page.
    Render,
}

/// Guard wrapping one protected page.
///
/// Holds the page's declared requirements plus the per-instance state
/// needed for fire-once redirects and the bounded loading timeout. An
/// unresolved session older than `loading_timeout` degrades to
/// unauthenticated instead of spinning forever.
pub struct RouteGuard {
    required_roles: Option<Vec<AdminRole>>,
    required_permission: Option<String>,
    loading_timeout: Duration,
    loading_since: Mutex<Option<Instant>>,
    redirected: AtomicBool,
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteGuard {
    pub fn new() -> Self {
        Self {
            required_roles: None,
            required_permission: None,
            loading_timeout: Duration::from_secs(10),
            loading_since: Mutex::new(None),
            redirected: AtomicBool::new(false),
        }
    }

    /// A guard with the configured loading bound and no requirements.
    pub fn from_config(config: &GateConfig) -> Self {
        Self::new().with_loading_timeout(Duration::from_secs(config.loading_timeout))
    }

    /// Require the user's role to be one of `roles` (exact membership).
    pub fn with_roles(mut self, roles: impl Into<Vec<AdminRole>>) -> Self {
        self.required_roles = Some(roles.into());
        self
    }

    /// Require a permission (wildcard/super_admin semantics apply).
    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.required_permission = Some(permission.into());
        self
    }

    /// Bound how long an unresolved session is tolerated.
    pub fn with_loading_timeout(mut self, timeout: Duration) -> Self {
        self.loading_timeout = timeout;
        self
    }

    /// Evaluate the guard against the current session state.
    ///
    /// `current_path` is preserved as the post-login return target.
    pub fn evaluate(&self, status: &AuthStatus, current_path: &str) -> GuardDecision {
        match status {
            AuthStatus::Loading => {
                let mut since = self.loading_since.lock().unwrap();
                let started = *since.get_or_insert_with(Instant::now);
                if started.elapsed() < self.loading_timeout {
                    return GuardDecision::Loading;
                }
                // Bootstrap hung past the deadline: fail safe.
                drop(since);
                self.fail_once(GuardDecision::RedirectToLogin(login_redirect_target(
                    current_path,
                )))
            }
            AuthStatus::Unauthenticated => self.fail_once(GuardDecision::RedirectToLogin(
                login_redirect_target(current_path),
            )),
            AuthStatus::Authenticated(user) => {
                *self.loading_since.lock().unwrap() = None;

                if let Some(roles) = &self.required_roles {
                    if !roles.contains(&user.role) {
                        return self.fail_once(GuardDecision::RedirectToUnauthorized(
                            UNAUTHORIZED_PATH.to_string(),
                        ));
                    }
                }
                if let Some(permission) = &self.required_permission {
                    if !rbac::role_allows(user.role, permission) {
                        return self.fail_once(GuardDecision::RedirectToUnauthorized(
                            UNAUTHORIZED_PATH.to_string(),
                        ));
                    }
                }

                // A passing evaluation re-arms the redirect.
                self.redirected.store(false, Ordering::SeqCst);
                GuardDecision::Render
            }
        }
    }

    /// One redirect per failing resolution; later evaluations of the
    /// same failing state render nothing.
    fn fail_once(&self, redirect: GuardDecision) -> GuardDecision {
        if self.redirected.swap(true, Ordering::SeqCst) {
            GuardDecision::Blocked
        } else {
            redirect
        }
    }
}
