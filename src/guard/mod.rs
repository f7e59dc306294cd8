//! The two request-side enforcement points.
//!
//! The edge guard runs before any page is served and looks only at token
//! presence; the route guard runs after the session resolves and enforces
//! roles and permissions. Both redirect through the same login target so
//! the enforcement points cannot disagree on where a rejected request
//! lands.

pub mod edge;
pub mod route;

pub use edge::{edge_decision, edge_guard, EdgeDecision};
pub use route::{GuardDecision, RouteGuard};
