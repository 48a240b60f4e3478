pub mod graph;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/graph/legend", get(graph::handle_legend))
        .route("/api/v1/graph/layout", post(graph::handle_layout))
        .route("/api/v1/graph/insert", post(graph::handle_insert))
        .route("/api/v1/graph/position", post(graph::handle_position))
        .with_state(state)
}
