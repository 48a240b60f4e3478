// Radial layout engine for the company graph.
// Pure, synchronous geometry over caller-supplied snapshots: nothing here
// performs I/O, keeps state between calls, or logs except through the
// injected observer.

pub mod config;
pub mod distance;
pub mod geometry;
pub mod impact;
pub mod relocation;
pub mod search;

use std::sync::Arc;

use crate::errors::LayoutError;
use crate::models::company::CompanyNode;
use crate::models::relocation::{Placement, RelocationOutcome, RelocationPlanEntry};
use crate::telemetry::{LayoutObserver, NoopObserver};

// Re-export the public API consumed by the routes and library users.
pub use config::LayoutConfig;
pub use distance::{LegendRing, ScoreBand};
pub use impact::{AnimationSchedule, ScheduledMove};

/// A validated configuration bundled with the observer that receives its
/// telemetry. Cheap to share behind an `Arc`; every call is independent.
#[derive(Clone)]
pub struct LayoutEngine {
    config: LayoutConfig,
    observer: Arc<dyn LayoutObserver>,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Result<Self, LayoutError> {
        config.validate()?;
        Ok(Self {
            config,
            observer: Arc::new(NoopObserver),
        })
    }

    pub fn with_observer(mut self, observer: Arc<dyn LayoutObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn distance_for_score(&self, score: f64) -> f64 {
        distance::distance_for_score(score, &self.config.rings)
    }

    pub fn find_position(
        &self,
        target_distance: f64,
        candidate_id: i64,
        placed: &[CompanyNode],
    ) -> Placement {
        search::find_position(
            target_distance,
            candidate_id,
            placed,
            &self.config,
            self.observer.as_ref(),
        )
    }

    pub fn plan_relocation(
        &self,
        new_node: &CompanyNode,
        existing: &[CompanyNode],
    ) -> RelocationOutcome {
        relocation::plan_relocation(new_node, existing, &self.config, self.observer.as_ref())
    }

    pub fn layout_all(&self, nodes: &[CompanyNode]) -> Vec<CompanyNode> {
        relocation::layout_all(nodes, &self.config, self.observer.as_ref())
    }

    pub fn estimate_impact(&self, plans: &[RelocationPlanEntry]) -> f64 {
        impact::estimate_impact(plans, &self.config.impact)
    }

    pub fn assign_animation_delays(&self, plans: &[RelocationPlanEntry]) -> AnimationSchedule {
        impact::assign_animation_delays(plans, &self.config.animation)
    }

    pub fn legend(&self) -> Vec<LegendRing> {
        distance::legend(&self.config.rings)
    }
}

impl std::fmt::Debug for LayoutEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
