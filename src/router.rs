use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::metrics::{metrics_middleware, render_metrics};
use crate::middleware::role::require_role;
use crate::modules::batches::router::init_batches_router;
use crate::modules::courses::router::init_courses_router;
use crate::modules::students::router::init_students_router;
use crate::state::AppState;
use axum::http::{HeaderValue, Method, header};
use axum::routing::get;
use axum::{Json, Router, middleware};
use isml_config::{CorsConfig, RouteGroup};
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .route("/api-docs/openapi.json", get(openapi_json))
        .route("/health", get(health))
        .route("/metrics", get(render_metrics))
        .nest(
            "/api",
            Router::new()
                .nest(
                    "/batches",
                    init_batches_router().route_layer(middleware::from_fn_with_state(
                        state.role_gate(RouteGroup::Batches),
                        require_role,
                    )),
                )
                .nest(
                    "/courses",
                    init_courses_router().route_layer(middleware::from_fn_with_state(
                        state.role_gate(RouteGroup::Courses),
                        require_role,
                    )),
                )
                .nest(
                    "/students",
                    init_students_router().route_layer(middleware::from_fn_with_state(
                        state.role_gate(RouteGroup::Students),
                        require_role,
                    )),
                ),
        )
        .with_state(state.clone())
        .layer(cors_layer(&state.cors_config))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT]);

    // Credentials cannot be combined with a wildcard origin.
    if config.allowed_origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(Any);
    }

    let allowed_origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    layer.allow_origin(allowed_origins).allow_credentials(true)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
