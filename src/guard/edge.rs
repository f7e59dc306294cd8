//! Edge guard — presence-only gate evaluated before page rendering.
//!
//! Runs once per incoming navigation, synchronously, with no backend
//! call: any admin path except the login page requires a session token in
//! the cookie jar. The check is purely presence-based; decoding and
//! expiry are the route guard's and backend's business. Its only job is
//! to never render protected UI to a client holding no credential at all.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;

use crate::config::SESSION_COOKIE;

/// Path prefix of the protected panel.
pub const ADMIN_PREFIX: &str = "/admin";

/// The one admin path that must stay reachable without a token.
pub const LOGIN_PATH: &str = "/admin/login";

/// Where an authenticated-but-unauthorized user lands.
pub const UNAUTHORIZED_PATH: &str = "/admin/unauthorized";

/// Paths the guard never intercepts: API routes, build assets, favicon.
/// Static configuration, not data-driven.
const EXCLUDED_PREFIXES: &[&str] = &["/api", "/_next/static", "/_next/image", "/favicon.ico"];

/// What the edge guard decided for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeDecision {
    /// Serve the request.
    Pass,
    /// Redirect to the login page, original path preserved.
    RedirectToLogin(String),
}

/// The login URL carrying the originally requested path, shared with the
/// route guard so both enforcement points redirect identically.
pub fn login_redirect_target(path: &str) -> String {
    format!("{LOGIN_PATH}?redirectTo={path}")
}

/// Prefix match with `/`-or-end semantics, so `/api` excludes `/api` and
/// `/api/orders` but not `/api-docs`.
fn is_excluded(path: &str) -> bool {
    EXCLUDED_PREFIXES.iter().any(|prefix| {
        path.strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    })
}

/// Decide a request from its path and token presence alone.
pub fn edge_decision(path: &str, has_token: bool) -> EdgeDecision {
    if is_excluded(path) {
        return EdgeDecision::Pass;
    }
    if !path.starts_with(ADMIN_PREFIX) {
        return EdgeDecision::Pass;
    }
    if path == LOGIN_PATH || path.starts_with(&format!("{LOGIN_PATH}/")) {
        return EdgeDecision::Pass;
    }
    if has_token {
        return EdgeDecision::Pass;
    }
    EdgeDecision::RedirectToLogin(login_redirect_target(path))
}

/// Axum middleware form of the guard.
pub async fn edge_guard(req: Request, next: Next) -> Response {
    let jar = CookieJar::from_headers(req.headers());
    let has_token = jar
        .get(SESSION_COOKIE)
        .is_some_and(|c| !c.value().is_empty());

    match edge_decision(req.uri().path(), has_token) {
        EdgeDecision::Pass => next.run(req).await,
        EdgeDecision::RedirectToLogin(target) => Redirect::temporary(&target).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Request as HttpRequest, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    use super::*;

    #[test]
    fn admin_path_without_token_redirects_with_return_target() {
        assert_eq!(
            edge_decision("/admin/products", false),
            EdgeDecision::RedirectToLogin("/admin/login?redirectTo=/admin/products".into()),
        );
    }

    #[test]
    fn admin_path_with_token_passes() {
        assert_eq!(edge_decision("/admin/products", true), EdgeDecision::Pass);
        assert!(matches!(
            edge_decision("/admin", false),
            EdgeDecision::RedirectToLogin(_)
        ));
    }

    #[test]
    fn login_page_never_redirects() {
        assert_eq!(edge_decision("/admin/login", false), EdgeDecision::Pass);
        assert_eq!(edge_decision("/admin/login", true), EdgeDecision::Pass);
    }

    #[test]
    fn api_and_assets_are_never_intercepted() {
        assert_eq!(edge_decision("/api/anything", false), EdgeDecision::Pass);
        assert_eq!(edge_decision("/api", false), EdgeDecision::Pass);
        assert_eq!(edge_decision("/_next/static/chunk.js", false), EdgeDecision::Pass);
        assert_eq!(edge_decision("/_next/image", false), EdgeDecision::Pass);
        assert_eq!(edge_decision("/favicon.ico", false), EdgeDecision::Pass);
    }

    #[test]
    fn exclusion_requires_path_separator() {
        // /api-docs is not /api/* — but it is also not an admin path,
        // so it passes for that reason, not via the exclusion list.
        assert!(!is_excluded("/api-docs"));
        assert!(is_excluded("/api/orders"));
    }

    #[test]
    fn storefront_paths_pass_through() {
        assert_eq!(edge_decision("/", false), EdgeDecision::Pass);
        assert_eq!(edge_decision("/products/shoe-1", false), EdgeDecision::Pass);
    }

    #[tokio::test]
    async fn middleware_redirects_and_passes() {
        let app = Router::new()
            .route("/admin/products", get(|| async { "products" }))
            .route("/admin/login", get(|| async { "login" }))
            .layer(axum::middleware::from_fn(edge_guard));

        // No cookie: redirected, original path preserved.
        let resp = app
            .clone()
            .oneshot(
                HttpRequest::builder()
                    .uri("/admin/products")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            resp.headers().get(header::LOCATION).unwrap(),
            "/admin/login?redirectTo=/admin/products",
        );

        // With cookie: served.
        let resp = app
            .clone()
            .oneshot(
                HttpRequest::builder()
                    .uri("/admin/products")
                    .header(header::COOKIE, format!("{SESSION_COOKIE}=tok"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        // Login page: served regardless of token.
        let resp = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/admin/login")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
