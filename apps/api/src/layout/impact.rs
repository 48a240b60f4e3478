//! Visual impact of a relocation plan, and the animation schedule for it.
//!
//! Neither function feeds back into placement. The impact score is a
//! diagnostic for comparing plans; the schedule is advisory timing metadata
//! for whatever drives the animation.

use serde::{Deserialize, Serialize};

use crate::layout::config::{AnimationConfig, ImpactConfig};
use crate::layout::geometry::{angular_delta, normalize_angle};
use crate::models::relocation::{Priority, RelocationPlanEntry};

/// Mean per-entry displacement: shortest rotation in degrees plus weighted
/// radial travel in pixels. Zero for an empty plan.
pub fn estimate_impact(plans: &[RelocationPlanEntry], config: &ImpactConfig) -> f64 {
    if plans.is_empty() {
        return 0.0;
    }
    let total: f64 = plans
        .iter()
        .map(|plan| {
            let rotation = angular_delta(plan.current_position.angle, plan.target_position.angle);
            let radial = (plan.target_position.distance - plan.current_position.distance).abs();
            rotation + radial * config.radial_weight
        })
        .sum();
    total / plans.len() as f64
}

/// When a single node should start moving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledMove {
    pub node_id: i64,
    pub priority: Priority,
    pub delay_ms: u64,
}

/// Moves in start order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationSchedule {
    pub moves: Vec<ScheduledMove>,
}

impl AnimationSchedule {
    pub fn delay_for(&self, node_id: i64) -> Option<u64> {
        self.moves
            .iter()
            .find(|m| m.node_id == node_id)
            .map(|m| m.delay_ms)
    }
}

/// Staggers moves tier by tier: all high-priority moves, then medium, then
/// low. Inside a tier, nodes start in order of their current angle so the
/// motion sweeps around the graph instead of popping at random.
pub fn assign_animation_delays(
    plans: &[RelocationPlanEntry],
    config: &AnimationConfig,
) -> AnimationSchedule {
    let mut ordered: Vec<&RelocationPlanEntry> = plans.iter().collect();
    // sort_by is stable: equal priority and angle keep plan order
    ordered.sort_by(|a, b| {
        a.priority.cmp(&b.priority).then_with(|| {
            normalize_angle(a.current_position.angle)
                .total_cmp(&normalize_angle(b.current_position.angle))
        })
    });

    let mut moves = Vec::with_capacity(ordered.len());
    let mut tier_start = 0u64;
    for tier in [Priority::High, Priority::Medium, Priority::Low] {
        let stagger = match tier {
            Priority::High => config.high_stagger_ms,
            Priority::Medium => config.medium_stagger_ms,
            Priority::Low => config.low_stagger_ms,
        };
        let mut last_delay = None;
        for (i, plan) in ordered.iter().filter(|p| p.priority == tier).enumerate() {
            let delay_ms = tier_start.saturating_add((i as u64).saturating_mul(stagger));
            moves.push(ScheduledMove {
                node_id: plan.node_id,
                priority: tier,
                delay_ms,
            });
            last_delay = Some(delay_ms);
        }
        if let Some(last) = last_delay {
            tier_start = last.saturating_add(config.tier_gap_ms);
        }
    }

    AnimationSchedule { moves }
}
