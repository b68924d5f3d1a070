//! # ISML DB
//!
//! Database pool and student record stores for the ISML academics API.
//!
//! - [`init_db_pool`] / [`lazy_pool`]: PostgreSQL pools built from [`DatabaseConfig`]
//! - [`StudentRecordStore`]: the store seam used by the approval workflow
//! - [`PgStudentStore`]: PostgreSQL implementation
//! - [`InMemoryStudentStore`]: process-local implementation for tests and demos
//!
//! # Example
//!
//! ```ignore
//! use isml_config::DatabaseConfig;
//! use isml_db::{PgStudentStore, init_db_pool};
//!
//! let pool = init_db_pool(&DatabaseConfig::from_env()?).await?;
//! let store = PgStudentStore::new(pool.clone());
//! ```

pub mod error;
pub mod memory;
pub mod postgres;
pub mod students;

use isml_config::DatabaseConfig;
use sqlx::postgres::PgPoolOptions;

pub use error::{StoreError, db_error};
pub use memory::InMemoryStudentStore;
pub use postgres::PgStudentStore;
pub use students::StudentRecordStore;

// Re-export PgPool for convenience
pub use sqlx::PgPool;

fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
}

/// Connects a PostgreSQL pool, failing fast if the database is unreachable.
///
/// Called once during startup; the pool is cheaply cloneable and shared
/// through the application state.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = pool_options(config).connect(&config.url).await?;
    tracing::info!(
        max_connections = config.max_connections,
        "Database pool initialized"
    );
    Ok(pool)
}

/// Builds a pool that only connects on first use.
pub fn lazy_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    pool_options(config).connect_lazy(&config.url)
}
