//! Middleware and extractors for request processing.
//!
//! - [`role`]: the per-route-group [`RoleGate`](role::RoleGate) and its
//!   `require_role` middleware
//! - [`auth`]: the [`AuthUser`](auth::AuthUser) extractor for handlers behind a gate
//!
//! # Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. `require_role` validates the token and checks its role against the
//!    roles configured for the route group
//! 3. The decoded claims are stored in the request extensions
//! 4. Handlers read them back with `AuthUser`
//!
//! # Example
//!
//! ```ignore
//! use axum::middleware;
//! use isml_config::RouteGroup;
//! use crate::middleware::role::require_role;
//!
//! let students = init_students_router().route_layer(middleware::from_fn_with_state(
//!     state.role_gate(RouteGroup::Students),
//!     require_role,
//! ));
//! ```

pub mod auth;
pub mod role;
