//! GET /api/admin/auth/me — resolve the current user.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use axum_extra::extract::cookie::CookieJar;

use crate::api::AppState;
use crate::config::SESSION_COOKIE;
use crate::store::{CookieTokenStore, TokenStore};

pub fn routes() -> Router<AppState> {
    Router::new().route("/me", get(me))
}

/// Resolve the current user with the one-refresh-one-retry policy; the
/// jar rides back on every response because a refresh may have rotated
/// (or cleared) the cookies.
async fn me(State(gateway): State<AppState>, jar: CookieJar) -> Response {
    let mut store = CookieTokenStore::new(jar, gateway.config());

    if store.read(SESSION_COOKIE).is_none() {
        let jar = store.into_jar();
        return (
            StatusCode::UNAUTHORIZED,
            jar,
            Json(serde_json::json!({"error": "Unauthorized"})),
        )
            .into_response();
    }

    let user = gateway.current_user_with_refresh(&mut store).await;
    let jar = store.into_jar();

    match user {
        Some(user) => {
            (jar, Json(serde_json::json!({"success": true, "user": user}))).into_response()
        }
        None => (
            StatusCode::UNAUTHORIZED,
            jar,
            Json(serde_json::json!({"error": "Unauthorized"})),
        )
            .into_response(),
    }
}
