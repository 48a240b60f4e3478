use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Service version plus the layout constants in effect, so a renderer can
/// check it is drawing at the scale the server lays out for.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let layout = &state.config.layout;
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "orbit-api",
        "layout": {
            "min_separation": layout.search.min_separation,
            "reposition_tolerance": layout.relocation.reposition_tolerance,
            "outer_radius": layout.rings.developing.outer,
        }
    }))
}
