//! Admin navigation menu, filtered by role permissions.

use crate::model::AdminRole;
use crate::rbac;

/// A menu entry. An item with no required permission is always visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub href: &'static str,
    pub permission: Option<&'static str>,
}

/// The full admin menu, in display order.
pub const NAV_ITEMS: &[NavItem] = &[
    NavItem { label: "Dashboard", href: "/admin", permission: None },
    NavItem { label: "Products", href: "/admin/products", permission: Some("products:read") },
    NavItem { label: "Orders", href: "/admin/orders", permission: Some("orders:read") },
    NavItem { label: "Customers", href: "/admin/customers", permission: Some("customers:read") },
    NavItem { label: "Categories", href: "/admin/categories", permission: Some("products:read") },
    NavItem { label: "Coupons", href: "/admin/coupons", permission: Some("products:read") },
    NavItem { label: "Reviews", href: "/admin/reviews", permission: Some("products:read") },
    NavItem { label: "Analytics", href: "/admin/analytics", permission: Some("analytics:read") },
    NavItem { label: "Settings", href: "/admin/settings", permission: Some("settings:read") },
];

/// Menu entries visible to `role`.
pub fn visible_items(role: AdminRole) -> Vec<&'static NavItem> {
    NAV_ITEMS
        .iter()
        .filter(|item| match item.permission {
            None => true,
            Some(p) => rbac::role_allows(role, p),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn super_admin_sees_everything() {
        assert_eq!(visible_items(AdminRole::SuperAdmin).len(), NAV_ITEMS.len());
    }

    #[test]
    fn dashboard_always_visible() {
        for role in [AdminRole::SuperAdmin, AdminRole::Manager, AdminRole::Staff] {
            assert!(visible_items(role).iter().any(|i| i.label == "Dashboard"));
        }
    }

    #[test]
    fn staff_does_not_see_settings() {
        let items = visible_items(AdminRole::Staff);
        assert!(!items.iter().any(|i| i.label == "Settings"));
        assert!(items.iter().any(|i| i.label == "Products"));
        assert!(items.iter().any(|i| i.label == "Analytics"));
    }

    #[test]
    fn manager_sees_settings_but_everything_staff_sees_too() {
        let manager: Vec<_> = visible_items(AdminRole::Manager)
            .iter().map(|i| i.label).collect();
        assert!(manager.contains(&"Settings"));
        for item in visible_items(AdminRole::Staff) {
            assert!(manager.contains(&item.label));
        }
    }
}
