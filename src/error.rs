use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

// ── Error codes ─────────────────────────────────────────────────────
//
// Stable, machine-readable identifiers. Clients match on these —
// never on the human-readable message string.

/// Stable error code constants.
pub mod error_code {
    pub const VALIDATION_FAILED: &str = "VALIDATION_FAILED";
    pub const UNAUTHENTICATED: &str = "UNAUTHENTICATED";
    pub const PERMISSION_DENIED: &str = "PERMISSION_DENIED";
    pub const UPSTREAM_ERROR: &str = "UPSTREAM_ERROR";
    pub const INTERNAL: &str = "INTERNAL";
}

/// Gate error type, used only at the HTTP boundary.
///
/// Expected auth-negative outcomes (no user, no permission) are data —
/// result records and [`crate::guard::GuardDecision`] variants — never
/// errors. `GateError` covers the cases that genuinely map to an HTTP
/// error response from the gate itself.
#[derive(Error, Debug)]
pub enum GateError {
    /// Input data is invalid. HTTP 400.
    #[error("{0}")]
    Validation(String),

    /// Missing or invalid credentials. HTTP 401.
    #[error("{0}")]
    Unauthorized(String),

    /// Authenticated but lacks the required permission. HTTP 403.
    #[error("{0}")]
    PermissionDenied(String),

    /// The commerce backend misbehaved. HTTP 502.
    #[error("{0}")]
    Upstream(String),

    /// Unexpected internal error. HTTP 500.
    #[error("{0}")]
    Internal(String),
}

impl GateError {
    /// Stable, machine-readable error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            GateError::Validation(_) => error_code::VALIDATION_FAILED,
            GateError::Unauthorized(_) => error_code::UNAUTHENTICATED,
            GateError::PermissionDenied(_) => error_code::PERMISSION_DENIED,
            GateError::Upstream(_) => error_code::UPSTREAM_ERROR,
            GateError::Internal(_) => error_code::INTERNAL,
        }
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            GateError::Validation(_) => StatusCode::BAD_REQUEST,
            GateError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            GateError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            GateError::Upstream(_) => StatusCode::BAD_GATEWAY,
            GateError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GateError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = serde_json::json!({
            "code": self.error_code(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_code_mapping() {
        assert_eq!(GateError::Validation("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(GateError::Unauthorized("x".into()).status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(GateError::PermissionDenied("x".into()).status_code(), StatusCode::FORBIDDEN);
        assert_eq!(GateError::Upstream("x".into()).status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(GateError::Internal("x".into()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_code_mapping() {
        assert_eq!(GateError::Validation("x".into()).error_code(), "VALIDATION_FAILED");
        assert_eq!(GateError::Unauthorized("x".into()).error_code(), "UNAUTHENTICATED");
        assert_eq!(GateError::PermissionDenied("x".into()).error_code(), "PERMISSION_DENIED");
        assert_eq!(GateError::Upstream("x".into()).error_code(), "UPSTREAM_ERROR");
        assert_eq!(GateError::Internal("x".into()).error_code(), "INTERNAL");
    }

    #[test]
    fn display_is_just_message() {
        assert_eq!(GateError::Unauthorized("missing token".into()).to_string(), "missing token");
        assert_eq!(GateError::Validation("bad input".into()).to_string(), "bad input");
    }
}
