//! Injectable telemetry for the layout engine.
//!
//! The engine never logs on its own. Callers pass a `LayoutObserver`; the
//! service wires in `TracingObserver`, library users default to `NoopObserver`.

use tracing::{debug, warn};

use crate::models::relocation::{Placement, PlacementStrategy, RelocationPlanEntry};

/// Notable decisions made while laying out a graph.
#[derive(Debug, Clone, Copy)]
pub enum LayoutEvent<'a> {
    /// The collision search settled on a position for `node_id`.
    PositionFound {
        node_id: i64,
        target_distance: f64,
        placement: &'a Placement,
    },
    /// The planner left a node where it was.
    NodeStable { node_id: i64, distance_error: f64 },
    /// The planner scheduled a move.
    NodeRelocated { entry: &'a RelocationPlanEntry },
}

/// Receives layout events. Implementations must be cheap; they run inline
/// with the geometry.
pub trait LayoutObserver: Send + Sync {
    fn on_event(&self, event: LayoutEvent<'_>);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl LayoutObserver for NoopObserver {
    fn on_event(&self, _event: LayoutEvent<'_>) {}
}

/// Forwards events to `tracing`. Fallback placements are warnings: they mean
/// the canvas is too crowded for the configured separation.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl LayoutObserver for TracingObserver {
    fn on_event(&self, event: LayoutEvent<'_>) {
        match event {
            LayoutEvent::PositionFound {
                node_id,
                target_distance,
                placement,
            } => match placement.strategy {
                PlacementStrategy::FallbackSector { sector } => warn!(
                    node_id,
                    target_distance,
                    sector,
                    angle = placement.position.angle,
                    distance = placement.position.distance,
                    "No collision-free angle; using least crowded sector"
                ),
                PlacementStrategy::Relaxed { offset } => debug!(
                    node_id,
                    target_distance,
                    offset,
                    angle = placement.position.angle,
                    "Placed on relaxed ring"
                ),
                PlacementStrategy::Ideal => debug!(
                    node_id,
                    target_distance,
                    angle = placement.position.angle,
                    "Placed on ideal ring"
                ),
            },
            LayoutEvent::NodeStable {
                node_id,
                distance_error,
            } => debug!(node_id, distance_error, "Node within tolerance; left in place"),
            LayoutEvent::NodeRelocated { entry } => debug!(
                node_id = entry.node_id,
                priority = ?entry.priority,
                reason = %entry.reason,
                "Node scheduled for relocation"
            ),
        }
    }
}
