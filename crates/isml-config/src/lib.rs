//! # ISML Config
//!
//! Configuration structures loaded once from the environment at startup:
//!
//! - [`jwt`]: bearer token signing secret and expiry
//! - [`roles`]: roles allowed on each route group
//! - [`cors`]: CORS allowed origins
//! - [`database`]: record store connection settings
//! - [`server`]: port, log directory and observability switch
//!
//! Every config type also has a `from_lookup` constructor taking a key lookup
//! closure, so tests never have to touch the process environment.
//!
//! # Example
//!
//! ```ignore
//! use isml_config::{JwtConfig, RouteRoles};
//!
//! let jwt_config = JwtConfig::from_env()?;
//! let route_roles = RouteRoles::from_env();
//! ```

pub mod cors;
pub mod database;
pub mod jwt;
pub mod roles;
pub mod server;

pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use jwt::JwtConfig;
pub use roles::{RouteGroup, RouteRoles};
pub use server::ServerConfig;
