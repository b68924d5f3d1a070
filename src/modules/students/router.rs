use crate::modules::students::controller::approve_student;
use crate::state::AppState;
use axum::{Router, routing::post};

pub fn init_students_router() -> Router<AppState> {
    Router::new().route("/approve", post(approve_student))
}
