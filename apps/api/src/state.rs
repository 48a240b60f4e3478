use std::sync::Arc;

use crate::config::Config;
use crate::layout::LayoutEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Immutable; handlers clone the `Arc` into blocking tasks.
    pub engine: Arc<LayoutEngine>,
    pub config: Config,
}
