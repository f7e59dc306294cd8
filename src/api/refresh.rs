//! POST /api/admin/auth/refresh — mint a new session token.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use axum_extra::extract::cookie::CookieJar;

use crate::api::AppState;
use crate::store::CookieTokenStore;

pub fn routes() -> Router<AppState> {
    Router::new().route("/refresh", post(refresh))
}

/// A failed refresh invalidates the whole session; the clearing cookies
/// ride back on the 401.
async fn refresh(State(gateway): State<AppState>, jar: CookieJar) -> Response {
    let mut store = CookieTokenStore::new(jar, gateway.config());
    let outcome = gateway.refresh(&mut store).await;
    let jar = store.into_jar();

    if outcome.success {
        (jar, Json(serde_json::json!({"success": true, "token": outcome.token}))).into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            jar,
            Json(serde_json::json!({"success": false, "error": outcome.error})),
        )
            .into_response()
    }
}
