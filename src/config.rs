//! Gate configuration.

/// Cookie holding the short-lived session token.
pub const SESSION_COOKIE: &str = "_admin_jwt";

/// Cookie holding the long-lived refresh token.
pub const REFRESH_COOKIE: &str = "_admin_refresh_jwt";

/// Configuration for the admin gate.
#[derive(Debug, Clone)]
pub struct GateConfig {
    /// Base URL of the commerce backend (no trailing slash).
    pub backend_url: String,
    /// Session cookie lifetime in seconds (default: 24h).
    pub session_ttl: i64,
    /// Refresh cookie lifetime in seconds (default: 7 days).
    pub refresh_ttl: i64,
    /// Whether cookies carry the Secure attribute (on in production).
    pub secure_cookies: bool,
    /// Path prefix cookies are scoped to, so the token is never sent on
    /// storefront requests.
    pub cookie_path: String,
    /// How long the route guard tolerates an unresolved session before
    /// degrading to unauthenticated (seconds).
    pub loading_timeout: u64,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:9000".to_string(),
            session_ttl: 86400,     // 24h
            refresh_ttl: 604800,    // 7 days
            secure_cookies: false,
            cookie_path: "/admin".to_string(),
            loading_timeout: 10,
        }
    }
}

impl GateConfig {
    /// Resolve the backend URL from the environment, falling back to the
    /// default. Checked in order: `COMMERCE_BACKEND_URL`, `BACKEND_URL`.
    pub fn backend_url_from_env() -> Option<String> {
        std::env::var("COMMERCE_BACKEND_URL")
            .or_else(|_| std::env::var("BACKEND_URL"))
            .ok()
            .filter(|s| !s.is_empty())
    }
}
