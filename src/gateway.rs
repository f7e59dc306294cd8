//! Auth gateway — the only component that talks to the commerce backend.
//!
//! Owns the request/response contract with the upstream identity endpoints
//! (login, logout, refresh, "who am I") and maps their responses into the
//! local [`AdminUser`] shape. Every operation returns a result record; a
//! network or parsing failure never escapes as an error.

use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::codec;
use crate::config::{GateConfig, REFRESH_COOKIE, SESSION_COOKIE};
use crate::model::{AdminUser, LoginOutcome, RefreshOutcome};
use crate::store::{CookieOptions, TokenStore};

/// HTTP gateway to the commerce backend's admin auth endpoints.
pub struct AuthGateway {
    http: reqwest::Client,
    config: GateConfig,
}

/// Outcome of the backend "who am I" call, before normalization.
enum MeResponse {
    Ok(serde_json::Value),
    Unauthorized,
    Failed,
}

impl AuthGateway {
    pub fn new(config: GateConfig) -> Self {
        Self { http: reqwest::Client::new(), config }
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.backend_url.trim_end_matches('/'), path)
    }

    // ── Login ───────────────────────────────────────────────────────

    /// Authenticate with email and password.
    ///
    /// Credentials are validated locally before any network call, so a
    /// malformed email never costs a round trip. On success both tokens
    /// are persisted and the normalized user is returned.
    pub async fn login(
        &self,
        store: &mut dyn TokenStore,
        email: &str,
        password: &str,
    ) -> LoginOutcome {
        let email = email.trim();

        if !is_valid_email(email) {
            return LoginOutcome::err("Please provide a valid email address");
        }
        if password.is_empty() {
            return LoginOutcome::err("Please provide your password");
        }

        let resp = self
            .http
            .post(self.url("/admin/auth/login"))
            .json(&serde_json::json!({"email": email, "password": password}))
            .send()
            .await;

        let resp = match resp {
            Ok(r) => r,
            Err(e) => {
                warn!("login request failed: {}", e);
                return LoginOutcome::err("Login failed");
            }
        };

        if !resp.status().is_success() {
            let status = resp.status();
            let body: serde_json::Value = resp.json().await.unwrap_or_default();
            let message = body
                .get("message")
                .or_else(|| body.get("error"))
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| {
                    if status == StatusCode::UNAUTHORIZED {
                        "Invalid credentials".to_string()
                    } else {
                        "Login failed".to_string()
                    }
                });
            return LoginOutcome::err(message);
        }

        let body: serde_json::Value = match resp.json().await {
            Ok(v) => v,
            Err(e) => {
                warn!("login response parse failed: {}", e);
                return LoginOutcome::err("Login failed");
            }
        };

        let Some(token) = bearer_token(&body) else {
            return LoginOutcome::err("No authentication token received");
        };

        store.write(SESSION_COOKIE, &token, &CookieOptions::session(&self.config));
        if let Some(refresh) = body.get("refresh_token").and_then(|v| v.as_str()) {
            store.write(REFRESH_COOKIE, refresh, &CookieOptions::refresh(&self.config));
        }

        let claims = codec::decode_payload(&token);
        LoginOutcome::ok(AdminUser::from_backend(&body, claims.as_ref()))
    }

    // ── Logout ──────────────────────────────────────────────────────

    /// End the session. Never fails from the caller's perspective.
    ///
    /// The backend logout call is best-effort; local token clearing runs
    /// unconditionally after the attempt, however it terminates.
    pub async fn logout(&self, store: &mut dyn TokenStore) {
        if let Some(token) = store.read(SESSION_COOKIE) {
            let result = self
                .http
                .delete(self.url("/admin/auth/user"))
                .bearer_auth(&token)
                .send()
                .await;
            match result {
                Ok(resp) if !resp.status().is_success() => {
                    debug!("backend logout returned {}", resp.status());
                }
                Err(e) => debug!("backend logout failed: {}", e),
                _ => {}
            }
        }

        store.clear(SESSION_COOKIE);
        store.clear(REFRESH_COOKIE);
    }

    // ── Refresh ─────────────────────────────────────────────────────

    /// Mint a new session token from the stored refresh token.
    ///
    /// A failed refresh invalidates the session entirely: both tokens are
    /// cleared, never leaving partial state behind.
    pub async fn refresh(&self, store: &mut dyn TokenStore) -> RefreshOutcome {
        let Some(refresh_token) = store.read(REFRESH_COOKIE) else {
            return RefreshOutcome::err("No refresh token available");
        };

        let resp = self
            .http
            .post(self.url("/admin/auth/token"))
            .json(&serde_json::json!({"refresh_token": refresh_token}))
            .send()
            .await;

        let resp = match resp {
            Ok(r) => r,
            Err(e) => {
                warn!("refresh request failed: {}", e);
                store.clear(SESSION_COOKIE);
                store.clear(REFRESH_COOKIE);
                return RefreshOutcome::err("Token refresh failed");
            }
        };

        if !resp.status().is_success() {
            store.clear(SESSION_COOKIE);
            store.clear(REFRESH_COOKIE);
            return RefreshOutcome::err("Token refresh failed");
        }

        let body: serde_json::Value = resp.json().await.unwrap_or_default();
        let Some(token) = bearer_token(&body) else {
            store.clear(SESSION_COOKIE);
            store.clear(REFRESH_COOKIE);
            return RefreshOutcome::err("No new token received");
        };

        store.write(SESSION_COOKIE, &token, &CookieOptions::session(&self.config));
        if let Some(rotated) = body.get("refresh_token").and_then(|v| v.as_str()) {
            store.write(REFRESH_COOKIE, rotated, &CookieOptions::refresh(&self.config));
        }

        RefreshOutcome::ok(token)
    }

    // ── Current user ────────────────────────────────────────────────

    /// Fetch the current user. `None` uniformly means "not authenticated":
    /// absent token, network failure, and non-success status all collapse
    /// into it.
    pub async fn current_user(&self, store: &mut dyn TokenStore) -> Option<AdminUser> {
        let token = store.read(SESSION_COOKIE)?;
        match self.fetch_me(&token).await {
            MeResponse::Ok(body) => {
                let claims = codec::decode_payload(&token);
                Some(AdminUser::from_backend(&body, claims.as_ref()))
            }
            _ => None,
        }
    }

    /// Fetch the current user, with the normative retry policy: on an
    /// unauthorized response, exactly one [`Self::refresh`] and exactly
    /// one retry. A second rejection is terminal.
    pub async fn current_user_with_refresh(
        &self,
        store: &mut dyn TokenStore,
    ) -> Option<AdminUser> {
        let token = store.read(SESSION_COOKIE)?;

        let body = match self.fetch_me(&token).await {
            MeResponse::Ok(body) => body,
            MeResponse::Failed => return None,
            MeResponse::Unauthorized => {
                if !self.refresh(store).await.success {
                    return None;
                }
                let retry_token = store.read(SESSION_COOKIE)?;
                match self.fetch_me(&retry_token).await {
                    MeResponse::Ok(body) => body,
                    _ => return None,
                }
            }
        };

        let token = store.read(SESSION_COOKIE)?;
        let claims = codec::decode_payload(&token);
        Some(AdminUser::from_backend(&body, claims.as_ref()))
    }

    async fn fetch_me(&self, token: &str) -> MeResponse {
        // no-store: a stale cached identity must never be reused.
        let resp = self
            .http
            .get(self.url("/admin/users/me"))
            .bearer_auth(token)
            .header(reqwest::header::CACHE_CONTROL, "no-store")
            .send()
            .await;

        let resp = match resp {
            Ok(r) => r,
            Err(e) => {
                warn!("current user request failed: {}", e);
                return MeResponse::Failed;
            }
        };

        if resp.status() == StatusCode::UNAUTHORIZED {
            return MeResponse::Unauthorized;
        }
        if !resp.status().is_success() {
            return MeResponse::Failed;
        }

        match resp.json().await {
            Ok(body) => MeResponse::Ok(body),
            Err(e) => {
                warn!("current user parse failed: {}", e);
                MeResponse::Failed
            }
        }
    }
}

/// Extract the session token from a backend response body.
fn bearer_token(body: &serde_json::Value) -> Option<String> {
    body.get("token")
        .or_else(|| body.get("access_token"))
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

/// Basic `local@domain.tld` shape check, mirroring the panel's
/// client-side validation. Not an RFC 5322 parser.
fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}
