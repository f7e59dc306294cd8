//! Token storage.
//!
//! The token store is the only cross-component mutable shared resource:
//! it holds the session and refresh tokens in scoped, durable,
//! cookie-equivalent storage. Pure accessor — no auth logic lives here.
//! Writes are last-writer-wins, never merged.

use std::collections::HashMap;

use axum_extra::extract::cookie::CookieJar;
use cookie::time::Duration;
use cookie::{Cookie, SameSite};

use crate::config::GateConfig;

/// Attributes applied when persisting a token.
#[derive(Debug, Clone)]
pub struct CookieOptions {
    /// Seconds until expiry. Zero or negative means "expire immediately".
    pub max_age_secs: i64,
    /// Not retrievable by page scripts.
    pub http_only: bool,
    /// Never sent on cross-site navigation.
    pub same_site_strict: bool,
    /// Transport-only; on in production.
    pub secure: bool,
    /// Path prefix the token is scoped to, so it is never sent on
    /// storefront requests.
    pub path: String,
}

impl CookieOptions {
    /// Options for the short-lived session token.
    pub fn session(config: &GateConfig) -> Self {
        Self {
            max_age_secs: config.session_ttl,
            http_only: true,
            same_site_strict: true,
            secure: config.secure_cookies,
            path: config.cookie_path.clone(),
        }
    }

    /// Options for the long-lived refresh token.
    pub fn refresh(config: &GateConfig) -> Self {
        Self {
            max_age_secs: config.refresh_ttl,
            ..Self::session(config)
        }
    }
}

/// Read/write/clear access to stored tokens.
///
/// Clearing is writing an empty value with a zero max-age, not a true
/// delete; a cleared token must subsequently read as absent.
pub trait TokenStore: Send {
    /// Read a stored token. Empty and expired values read as absent.
    fn read(&self, name: &str) -> Option<String>;

    /// Persist a token with the given attributes.
    fn write(&mut self, name: &str, value: &str, options: &CookieOptions);

    /// Clear a stored token.
    fn clear(&mut self, name: &str);
}

// ── Cookie-backed store ─────────────────────────────────────────────

/// Token store over a request/response cookie jar.
///
/// Reads come from the cookies the browser sent; writes accumulate as
/// `Set-Cookie` deltas, recovered via [`CookieTokenStore::into_jar`] when
/// building the response.
pub struct CookieTokenStore {
    jar: CookieJar,
    path: String,
}

impl CookieTokenStore {
    pub fn new(jar: CookieJar, config: &GateConfig) -> Self {
        Self { jar, path: config.cookie_path.clone() }
    }

    /// Consume the store, yielding the jar with any pending deltas.
    pub fn into_jar(self) -> CookieJar {
        self.jar
    }
}

impl TokenStore for CookieTokenStore {
    fn read(&self, name: &str) -> Option<String> {
        self.jar
            .get(name)
            .map(|c| c.value().to_string())
            .filter(|v| !v.is_empty())
    }

    fn write(&mut self, name: &str, value: &str, options: &CookieOptions) {
        let mut cookie = Cookie::new(name.to_string(), value.to_string());
        cookie.set_path(options.path.clone());
        cookie.set_http_only(options.http_only);
        if options.same_site_strict {
            cookie.set_same_site(SameSite::Strict);
        }
        cookie.set_secure(options.secure);
        cookie.set_max_age(Duration::seconds(options.max_age_secs.max(0)));
        self.jar = self.jar.clone().add(cookie);
    }

    fn clear(&mut self, name: &str) {
        let mut cookie = Cookie::new(name.to_string(), String::new());
        cookie.set_path(self.path.clone());
        cookie.set_max_age(Duration::ZERO);
        self.jar = self.jar.clone().add(cookie);
    }
}

// ── In-memory store ─────────────────────────────────────────────────

/// In-memory token store for tests and non-HTTP callers.
///
/// Honors the same read-as-absent semantics as the cookie store: empty or
/// zero-max-age values do not read back.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    values: HashMap<String, (String, i64)>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor with a session token already present.
    pub fn with_token(name: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.values.insert(name.to_string(), (value.to_string(), 86400));
        store
    }
}

impl TokenStore for MemoryTokenStore {
    fn read(&self, name: &str) -> Option<String> {
        self.values
            .get(name)
            .filter(|(value, max_age)| !value.is_empty() && *max_age > 0)
            .map(|(value, _)| value.clone())
    }

    fn write(&mut self, name: &str, value: &str, options: &CookieOptions) {
        self.values
            .insert(name.to_string(), (value.to_string(), options.max_age_secs));
    }

    fn clear(&mut self, name: &str) {
        self.values.insert(name.to_string(), (String::new(), 0));
    }
}
