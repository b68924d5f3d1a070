use crate::modules::batches::controller::{
    create_batch, delete_batch, get_batch, get_batches, update_batch,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn init_batches_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_batch).get(get_batches))
        .route(
            "/{id}",
            get(get_batch).put(update_batch).delete(delete_batch),
        )
}
