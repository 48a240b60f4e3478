//! Radial layout engine for the company-exploration graph, plus the thin
//! HTTP service that exposes it.
//!
//! Companies orbit a central "self" node at a distance set by their match
//! score. The engine (`layout`) turns a flat list of scored companies into
//! non-overlapping polar positions, plans minimal moves when a company is
//! inserted, and scores how disruptive those moves look.

pub mod config;
pub mod errors;
pub mod layout;
pub mod models;
pub mod routes;
pub mod state;
pub mod telemetry;

pub use errors::{AppError, LayoutError};
pub use layout::{LayoutConfig, LayoutEngine};
pub use models::company::{CompanyNode, PolarPosition};
pub use models::relocation::{
    Placement, PlacementStrategy, Priority, RelocationOutcome, RelocationPlanEntry,
};
pub use telemetry::{LayoutEvent, LayoutObserver, NoopObserver, TracingObserver};
