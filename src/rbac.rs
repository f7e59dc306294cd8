//! Role → permission tables.
//!
//! Static configuration resolved at compile time, never derived from the
//! backend at runtime. Permission strings are `<resource>:<action>` tags;
//! `super_admin` holds the universal wildcard `*`, which satisfies every
//! check before any table lookup happens.

use crate::model::AdminRole;

/// The universal wildcard permission.
pub const WILDCARD: &str = "*";

const SUPER_ADMIN_PERMISSIONS: &[&str] = &[WILDCARD];

const MANAGER_PERMISSIONS: &[&str] = &[
    "products:read",
    "products:create",
    "products:update",
    "products:delete",
    "orders:read",
    "orders:update",
    "customers:read",
    "customers:update",
    "analytics:read",
    "settings:read",
];

const STAFF_PERMISSIONS: &[&str] = &[
    "products:read",
    "orders:read",
    "customers:read",
    "analytics:read",
];

/// Permission set granted to a role.
pub fn permissions_for(role: AdminRole) -> &'static [&'static str] {
    match role {
        AdminRole::SuperAdmin => SUPER_ADMIN_PERMISSIONS,
        AdminRole::Manager => MANAGER_PERMISSIONS,
        AdminRole::Staff => STAFF_PERMISSIONS,
    }
}

/// Whether `role` grants `permission`.
///
/// super_admin short-circuits before any set lookup; other roles match the
/// literal permission or a wildcard member of their table.
pub fn role_allows(role: AdminRole, permission: &str) -> bool {
    if role == AdminRole::SuperAdmin {
        return true;
    }
    permissions_for(role)
        .iter()
        .any(|p| *p == permission || *p == WILDCARD)
}
