mod login;
mod logout;
mod me;
mod refresh;

use std::sync::Arc;

use axum::Router;

use crate::gateway::AuthGateway;

/// Shared application state.
pub type AppState = Arc<AuthGateway>;

/// Build the local-facing auth router, mounted under `/api/admin/auth`.
///
/// These routes are what the panel's rendering layer talks to; each one
/// translates the backend contract into the normalized
/// `{success, user?, error?}` envelope and owns the cookie side effects.
pub fn build_router(gateway: Arc<AuthGateway>) -> Router {
    let api = Router::new()
        .merge(login::routes())
        .merge(logout::routes())
        .merge(me::routes())
        .merge(refresh::routes());

    Router::new()
        .nest("/api/admin/auth", api)
        .with_state(gateway)
}
