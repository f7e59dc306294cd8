//! POST /api/admin/auth/logout — end the session.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use axum_extra::extract::cookie::CookieJar;

use crate::api::AppState;
use crate::store::CookieTokenStore;

pub fn routes() -> Router<AppState> {
    Router::new().route("/logout", post(logout))
}

/// Logout never fails: the backend call is best-effort and local cookie
/// clearing is unconditional.
async fn logout(State(gateway): State<AppState>, jar: CookieJar) -> Response {
    let mut store = CookieTokenStore::new(jar, gateway.config());
    gateway.logout(&mut store).await;
    let jar = store.into_jar();

    (jar, Json(serde_json::json!({"success": true}))).into_response()
}
