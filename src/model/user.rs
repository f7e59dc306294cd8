use serde::{Deserialize, Serialize};

use crate::model::TokenPayload;

/// Staff role. Exactly three values; privileges come from the static
/// permission tables in [`crate::rbac`], not from an assumed ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    SuperAdmin,
    Manager,
    #[default]
    Staff,
}

impl AdminRole {
    /// Wire representation, matching the backend's role strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminRole::SuperAdmin => "super_admin",
            AdminRole::Manager => "manager",
            AdminRole::Staff => "staff",
        }
    }

    /// Parse a backend role string. Unknown or absent roles fall back to
    /// the least-privileged role.
    pub fn parse_or_default(s: Option<&str>) -> Self {
        match s {
            Some("super_admin") => AdminRole::SuperAdmin,
            Some("manager") => AdminRole::Manager,
            _ => AdminRole::Staff,
        }
    }
}

impl std::fmt::Display for AdminRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The resolved admin identity.
///
/// Derived by merging the backend's user object with the decoded token
/// payload; the backend wins, the payload fills gaps, and missing name
/// fields take the "Admin User" defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: String,

    pub email: String,

    pub first_name: String,

    pub last_name: String,

    pub role: AdminRole,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl AdminUser {
    /// Normalize a backend response body into an `AdminUser`.
    ///
    /// The backend returns either `{"user": {...}}` or a bare user object.
    /// `claims` — the unverified payload of the token that accompanied the
    /// response, used to fill fields the backend omitted.
    pub fn from_backend(body: &serde_json::Value, claims: Option<&TokenPayload>) -> Self {
        let user = body.get("user").unwrap_or(body);

        let id = user
            .get("id")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .or_else(|| claims.and_then(|c| c.sub.clone()))
            .unwrap_or_default();

        let email = user
            .get("email")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .or_else(|| claims.and_then(|c| c.email.clone()))
            .unwrap_or_default();

        let first_name = user
            .get("first_name")
            .and_then(|v| v.as_str())
            .or_else(|| claims.and_then(|c| c.first_name.as_deref()))
            .unwrap_or("Admin")
            .to_string();

        let last_name = user
            .get("last_name")
            .and_then(|v| v.as_str())
            .or_else(|| claims.and_then(|c| c.last_name.as_deref()))
            .unwrap_or("User")
            .to_string();

        let role = AdminRole::parse_or_default(
            user.get("role")
                .and_then(|v| v.as_str())
                .or_else(|| claims.and_then(|c| c.role.as_deref())),
        );

        let avatar = user
            .get("avatar")
            .and_then(|v| v.as_str())
            .map(str::to_string);

        Self { id, email, first_name, last_name, role, avatar }
    }
}
