use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use orbit_api::config::Config;
use orbit_api::routes::build_router;
use orbit_api::state::AppState;
use orbit_api::{LayoutEngine, TracingObserver};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; a bad layout config aborts startup.
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("orbit_api={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Orbit API v{}", env!("CARGO_PKG_VERSION"));

    let engine = LayoutEngine::new(config.layout.clone())?
        .with_observer(Arc::new(TracingObserver));
    info!(
        "Layout engine ready (min separation {}px, reposition tolerance {}px)",
        config.layout.search.min_separation, config.layout.relocation.reposition_tolerance
    );

    let state = AppState {
        engine: Arc::new(engine),
        config: config.clone(),
    };

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()), // TODO: restrict to the web front-end origin once it is configurable
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
