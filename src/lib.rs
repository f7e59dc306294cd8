//! Admin gate — authentication + RBAC core for a commerce admin panel.
//!
//! The gate sits between staff browsers and the commerce backend. It owns
//! the admin token lifecycle and every authorization decision the panel
//! makes, across three enforcement points that must never disagree:
//!
//! - **Edge guard** — presence-only cookie check before any page is served
//! - **BFF auth routes** — login/logout/me/refresh, translating the backend
//!   contract into a normalized `{success, user?, error?}` envelope
//! - **Route guard** — post-resolution role/permission enforcement driven
//!   by the shared [`session::SessionContext`]
//!
//! # Usage
//!
//! ```ignore
//! use admin_gate::{api, config::GateConfig, gateway::AuthGateway};
//!
//! let gateway = AuthGateway::new(GateConfig::default());
//! let router = api::build_router(std::sync::Arc::new(gateway));
//! ```

pub mod api;
pub mod codec;
pub mod config;
pub mod error;
pub mod gateway;
pub mod guard;
pub mod model;
pub mod nav;
pub mod rbac;
pub mod session;
pub mod store;
