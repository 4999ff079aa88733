pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/",
            get(handlers::handle_upload_form).post(handlers::handle_root_post),
        )
        .route("/match", post(handlers::handle_match))
        .route("/api/v1/similarity", post(handlers::handle_similarity))
        .layer(body_limit)
        .with_state(state)
}
