use serde::{Deserialize, Serialize};

use crate::model::AdminUser;

/// Unverified token payload.
///
/// Every field is optional — backends differ in what they embed, and the
/// codec never fails on missing claims, only on malformed structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    /// Expiration (unix timestamp). Informational only — the gate never
    /// enforces expiry locally; the backend does.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

/// Request body for the login route.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Outcome of a login attempt. Auth-negative results are data, not errors.
#[derive(Debug, Clone, Serialize)]
pub struct LoginOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<AdminUser>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LoginOutcome {
    pub fn ok(user: AdminUser) -> Self {
        Self { success: true, user: Some(user), error: None }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self { success: false, user: None, error: Some(message.into()) }
    }
}

/// Outcome of a token refresh.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RefreshOutcome {
    pub fn ok(token: impl Into<String>) -> Self {
        Self { success: true, token: Some(token.into()), error: None }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self { success: false, token: None, error: Some(message.into()) }
    }
}
