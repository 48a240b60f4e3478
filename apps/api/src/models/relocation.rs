use serde::{Deserialize, Serialize};

use crate::models::company::{CompanyNode, PolarPosition};

/// Animation urgency of a single move. Ordered High < Medium < Low so that a
/// plain sort puts the most urgent moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// How the collision search arrived at a position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlacementStrategy {
    /// Collision-free on the requested ring.
    Ideal,
    /// Collision-free after pushing outward by `offset` pixels.
    Relaxed { offset: f64 },
    /// No free angle anywhere; parked in the least crowded sector.
    FallbackSector { sector: usize },
}

/// Result of a single position search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub position: PolarPosition,
    pub strategy: PlacementStrategy,
}

/// One node that has to move, consumed by the animation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelocationPlanEntry {
    pub node_id: i64,
    /// Where the node is now. Nodes without a usable position start from
    /// their anchor: the seed angle on their ideal ring.
    pub current_position: PolarPosition,
    pub target_position: PolarPosition,
    pub priority: Priority,
    pub reason: String,
}

/// Everything the planner decided for one insertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelocationOutcome {
    /// Every node after the insertion, in processing order.
    pub relocated_nodes: Vec<CompanyNode>,
    pub plans: Vec<RelocationPlanEntry>,
    pub stable_node_ids: Vec<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_sorts_most_urgent_first() {
        let mut priorities = vec![Priority::Low, Priority::High, Priority::Medium];
        priorities.sort();
        assert_eq!(priorities, vec![Priority::High, Priority::Medium, Priority::Low]);
    }

    #[test]
    fn test_strategy_serializes_with_kind_tag() {
        let json = serde_json::to_value(PlacementStrategy::Relaxed { offset: 15.0 }).unwrap();
        assert_eq!(json["kind"], "relaxed");
        assert_eq!(json["offset"], 15.0);
    }
}
