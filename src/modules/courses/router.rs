use crate::modules::courses::controller::{create_course, delete_course};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, post},
};

pub fn init_courses_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_course))
        .route("/{id}", delete(delete_course))
}
