use std::sync::Arc;

use anyhow::Context;
use isml_auth::TokenValidator;
use isml_config::{CorsConfig, DatabaseConfig, JwtConfig, RouteGroup, RouteRoles, ServerConfig};
use isml_db::{PgPool, PgStudentStore, StudentRecordStore, init_db_pool};
use metrics_exporter_prometheus::PrometheusHandle;

use crate::metrics::init_metrics;
use crate::middleware::role::RoleGate;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub students: Arc<dyn StudentRecordStore>,
    pub jwt_config: JwtConfig,
    pub token_validator: TokenValidator,
    pub route_roles: RouteRoles,
    pub cors_config: CorsConfig,
    pub metrics_handle: Option<PrometheusHandle>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("students", &self.students)
            .field("route_roles", &self.route_roles)
            .field("cors_config", &self.cors_config)
            .field("metrics_enabled", &self.metrics_handle.is_some())
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Builds state around an explicit store, without metrics.
    pub fn new(
        db: PgPool,
        students: Arc<dyn StudentRecordStore>,
        jwt_config: JwtConfig,
        route_roles: RouteRoles,
        cors_config: CorsConfig,
    ) -> Self {
        Self {
            token_validator: TokenValidator::new(&jwt_config),
            db,
            students,
            jwt_config,
            route_roles,
            cors_config,
            metrics_handle: None,
        }
    }

    /// The gate guarding one route group, built from the configured roles.
    pub fn role_gate(&self, group: RouteGroup) -> RoleGate {
        RoleGate::new(
            self.token_validator.clone(),
            self.route_roles.roles_for(group),
        )
    }
}

/// Reads configuration and connects to the database.
///
/// A missing `SECRET_KEY` or `DATABASE_URL` aborts startup.
pub async fn init_app_state(server_config: &ServerConfig) -> anyhow::Result<AppState> {
    let jwt_config = JwtConfig::from_env()?;
    let db_config = DatabaseConfig::from_env()?;
    let db = init_db_pool(&db_config)
        .await
        .context("Failed to connect to database")?;

    let mut state = AppState::new(
        db.clone(),
        Arc::new(PgStudentStore::new(db)),
        jwt_config,
        RouteRoles::from_env(),
        CorsConfig::from_env(),
    );
    state.metrics_handle = init_metrics(server_config.observability_enabled)?;

    for group in RouteGroup::ALL {
        tracing::info!(
            group = group.as_str(),
            roles = ?state.route_roles.roles_for(group),
            "Route group roles"
        );
    }

    Ok(state)
}
