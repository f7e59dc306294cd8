//! POST /api/admin/auth/login — authenticate and set token cookies.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use axum_extra::extract::cookie::CookieJar;

use crate::api::AppState;
use crate::error::GateError;
use crate::model::LoginRequest;
use crate::store::CookieTokenStore;

pub fn routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// Proxy the login to the backend; on success the session and refresh
/// cookies ride back on the response.
async fn login(
    State(gateway): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Response {
    if body.email.is_empty() || body.password.is_empty() {
        return GateError::Validation("Email and password are required".into()).into_response();
    }

    let mut store = CookieTokenStore::new(jar, gateway.config());
    let outcome = gateway.login(&mut store, &body.email, &body.password).await;
    let jar = store.into_jar();

    if outcome.success {
        (jar, Json(serde_json::json!({"success": true, "user": outcome.user}))).into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            jar,
            Json(serde_json::json!({"success": false, "error": outcome.error})),
        )
            .into_response()
    }
}
