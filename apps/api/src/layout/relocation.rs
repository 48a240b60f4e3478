//! Relocation planning for incremental inserts, and full re-layouts.
//!
//! On insert, nodes are visited best score first so the most central
//! companies claim their ring before anyone else. A node only moves if it is
//! the new one, has no usable position, or has drifted too far from its ideal
//! distance. Everything else stays put, so the graph does not reshuffle on
//! every discovery.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::layout::config::{LayoutConfig, RelocationConfig};
use crate::layout::distance::distance_for_score;
use crate::layout::search::{find_position, seed_angle};
use crate::models::company::{CompanyNode, PolarPosition};
use crate::models::relocation::{Priority, RelocationOutcome, RelocationPlanEntry};
use crate::telemetry::{LayoutEvent, LayoutObserver};

// ────────────────────────────────────────────────────────────────────────────
// Incremental insert
// ────────────────────────────────────────────────────────────────────────────

/// Plans the moves needed to insert `new_node` into `existing`.
///
/// Collision checks only consider nodes already finalised in this pass;
/// nodes further down the score order are not yet constraints. Any copy of
/// the new node's id inside `existing` is superseded by `new_node`, and a
/// repeated id in `existing` keeps only its first occurrence.
pub fn plan_relocation(
    new_node: &CompanyNode,
    existing: &[CompanyNode],
    config: &LayoutConfig,
    observer: &dyn LayoutObserver,
) -> RelocationOutcome {
    // A re-inserted company animates from wherever its stale copy was drawn.
    let inserted = CompanyNode {
        position: new_node.valid_position().or_else(|| {
            existing
                .iter()
                .find(|node| node.id == new_node.id)
                .and_then(CompanyNode::valid_position)
        }),
        ..new_node.clone()
    };
    let mut seen = HashSet::from([new_node.id]);
    let mut candidates: Vec<&CompanyNode> = existing
        .iter()
        .filter(|node| seen.insert(node.id))
        .chain(std::iter::once(&inserted))
        .collect();
    candidates.sort_by(|a, b| by_score_then_id(a, b));

    let mut finalized: Vec<CompanyNode> = Vec::with_capacity(candidates.len());
    let mut plans = Vec::new();
    let mut stable_node_ids = Vec::new();

    for node in candidates {
        let ideal = distance_for_score(node.match_score, &config.rings);
        let is_new = node.id == new_node.id;
        let current = node.valid_position();
        let error = current.map(|p| (p.distance - ideal).abs());

        let needs_move = is_new
            || match error {
                Some(error) => error > config.relocation.reposition_tolerance,
                None => true,
            };

        if !needs_move {
            observer.on_event(LayoutEvent::NodeStable {
                node_id: node.id,
                distance_error: error.unwrap_or(0.0),
            });
            stable_node_ids.push(node.id);
            finalized.push(node.clone());
            continue;
        }

        let placement = find_position(ideal, node.id, &finalized, config, observer);
        let current_position = current.unwrap_or(PolarPosition {
            angle: seed_angle(node.id, &config.search),
            distance: ideal,
        });
        let entry = RelocationPlanEntry {
            node_id: node.id,
            current_position,
            target_position: placement.position,
            priority: classify_priority(is_new, error, &config.relocation),
            reason: describe_reason(is_new, error),
        };
        observer.on_event(LayoutEvent::NodeRelocated { entry: &entry });
        plans.push(entry);

        finalized.push(CompanyNode {
            position: Some(placement.position),
            ..node.clone()
        });
    }

    RelocationOutcome {
        relocated_nodes: finalized,
        plans,
        stable_node_ids,
    }
}

fn classify_priority(is_new: bool, error: Option<f64>, config: &RelocationConfig) -> Priority {
    match error {
        _ if is_new => Priority::High,
        None => Priority::High,
        Some(e) if e > config.high_priority_error => Priority::High,
        Some(e) if e >= config.medium_priority_error => Priority::Medium,
        Some(_) => Priority::Low,
    }
}

fn describe_reason(is_new: bool, error: Option<f64>) -> String {
    match (is_new, error) {
        (true, _) => "Newly inserted company".to_string(),
        (false, None) => "Missing or invalid position".to_string(),
        (false, Some(error)) => format!("Distance {error:.1}px off its ideal ring"),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Full re-layout
// ────────────────────────────────────────────────────────────────────────────

/// Lays out every node from scratch, ignoring prior positions.
///
/// Used when the company set is replaced wholesale. Output is in placement
/// order (best score first).
pub fn layout_all(
    nodes: &[CompanyNode],
    config: &LayoutConfig,
    observer: &dyn LayoutObserver,
) -> Vec<CompanyNode> {
    let mut ordered: Vec<&CompanyNode> = nodes.iter().collect();
    ordered.sort_by(|a, b| by_score_then_id(a, b));

    let mut placed: Vec<CompanyNode> = Vec::with_capacity(ordered.len());
    for node in ordered {
        // Later duplicates of an id replace nothing; the first one wins.
        if placed.iter().any(|p| p.id == node.id) {
            continue;
        }
        let ideal = distance_for_score(node.match_score, &config.rings);
        let placement = find_position(ideal, node.id, &placed, config, observer);
        placed.push(CompanyNode {
            position: Some(placement.position),
            ..node.clone()
        });
    }
    placed
}

/// Higher score first; equal scores fall back to ascending id.
fn by_score_then_id(a: &CompanyNode, b: &CompanyNode) -> Ordering {
    b.clamped_score()
        .total_cmp(&a.clamped_score())
        .then_with(|| a.id.cmp(&b.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::geometry::separation;
    use crate::layout::impact::estimate_impact;
    use crate::telemetry::testing::RecordingObserver;
    use crate::telemetry::NoopObserver;

    fn config() -> LayoutConfig {
        LayoutConfig::default()
    }

    fn plan_for<'a>(outcome: &'a RelocationOutcome, id: i64) -> Option<&'a RelocationPlanEntry> {
        outcome.plans.iter().find(|p| p.node_id == id)
    }

    /// Inserts `scores` one at a time (ids 1..) and returns every plan produced.
    fn insert_sequentially(
        scores: &[f64],
        observer: &dyn LayoutObserver,
    ) -> (Vec<RelocationPlanEntry>, Vec<CompanyNode>) {
        let config = config();
        let mut nodes: Vec<CompanyNode> = Vec::new();
        let mut all_plans = Vec::new();
        for (i, &score) in scores.iter().enumerate() {
            let new_node = CompanyNode::new(i as i64 + 1, score);
            let outcome = plan_relocation(&new_node, &nodes, &config, observer);
            nodes = outcome.relocated_nodes;
            all_plans.extend(outcome.plans);
        }
        (all_plans, nodes)
    }

    #[test]
    fn test_example_insert_keeps_well_placed_neighbour() {
        // Score 85 ideally sits at 160px; 95 at 80px.
        let existing = vec![CompanyNode::at(1, 85.0, 0.0, 160.0)];
        let new_node = CompanyNode::new(2, 95.0);
        let outcome = plan_relocation(&new_node, &existing, &config(), &NoopObserver);

        assert_eq!(outcome.stable_node_ids, vec![1]);
        assert_eq!(outcome.plans.len(), 1);
        let plan = plan_for(&outcome, 2).expect("new node must be planned");
        assert_eq!(plan.priority, Priority::High);
        assert!((plan.target_position.distance - 80.0).abs() < 1e-9);
        assert!(plan.target_position.angle >= 0.0);

        let kept = outcome
            .relocated_nodes
            .iter()
            .find(|n| n.id == 1)
            .expect("existing node returned");
        assert_eq!(kept, &existing[0]);
    }

    #[test]
    fn test_existing_within_tolerance_is_stable() {
        // 15px off ideal (160) is inside the 20px tolerance.
        let existing = vec![
            CompanyNode::at(1, 85.0, 30.0, 175.0),
            CompanyNode::at(3, 72.0, 200.0, 252.0),
        ];
        let outcome = plan_relocation(&CompanyNode::new(9, 60.0), &existing, &config(), &NoopObserver);
        assert_eq!(outcome.stable_node_ids, vec![1, 3]);
        for original in &existing {
            let returned = outcome
                .relocated_nodes
                .iter()
                .find(|n| n.id == original.id)
                .unwrap();
            assert_eq!(returned, original);
        }
    }

    #[test]
    fn test_drifted_nodes_get_priority_by_error() {
        let existing = vec![
            // ideal 160: error 60 → high
            CompanyNode::at(1, 85.0, 0.0, 220.0),
            // ideal 100 (score 90): error 40 → medium
            CompanyNode::at(2, 90.0, 90.0, 140.0),
            // ideal 252 (score 72): error 25 → low
            CompanyNode::at(3, 72.0, 180.0, 277.0),
        ];
        let outcome = plan_relocation(&CompanyNode::new(4, 50.0), &existing, &config(), &NoopObserver);

        assert!(outcome.stable_node_ids.is_empty());
        assert_eq!(plan_for(&outcome, 1).unwrap().priority, Priority::High);
        assert_eq!(plan_for(&outcome, 2).unwrap().priority, Priority::Medium);
        assert_eq!(plan_for(&outcome, 3).unwrap().priority, Priority::Low);
        assert_eq!(plan_for(&outcome, 4).unwrap().priority, Priority::High);
        assert!(plan_for(&outcome, 2).unwrap().reason.contains("40.0px"));
    }

    #[test]
    fn test_new_node_always_planned_even_when_crowded() {
        let mut existing = Vec::new();
        for k in 0..36 {
            existing.push(CompanyNode::at(100 + k, 95.0, k as f64 * 10.0, 80.0));
        }
        let outcome = plan_relocation(&CompanyNode::new(1, 95.0), &existing, &config(), &NoopObserver);
        assert!(plan_for(&outcome, 1).is_some());
        assert_eq!(outcome.relocated_nodes.len(), 37);
    }

    #[test]
    fn test_malformed_existing_node_is_repositioned() {
        let existing = vec![
            CompanyNode::at(1, 85.0, f64::NAN, 160.0),
            CompanyNode::at(2, 85.0, 10.0, f64::INFINITY),
        ];
        let outcome = plan_relocation(&CompanyNode::new(3, 70.0), &existing, &config(), &NoopObserver);
        for id in [1, 2] {
            let plan = plan_for(&outcome, id).expect("malformed node must move");
            assert_eq!(plan.priority, Priority::High);
            assert!(plan.current_position.is_valid());
            assert!(plan.target_position.is_valid());
        }
        assert!(outcome
            .relocated_nodes
            .iter()
            .all(|n| n.valid_position().is_some()));
    }

    #[test]
    fn test_stale_copy_of_new_node_is_replaced() {
        let existing = vec![CompanyNode::at(5, 40.0, 0.0, 350.0)];
        let new_node = CompanyNode::new(5, 95.0);
        let outcome = plan_relocation(&new_node, &existing, &config(), &NoopObserver);
        assert_eq!(outcome.relocated_nodes.len(), 1);
        assert_eq!(outcome.relocated_nodes[0].match_score, 95.0);
        assert_eq!(outcome.plans[0].current_position.distance, 350.0);
    }

    #[test]
    fn test_duplicate_existing_ids_keep_first_copy() {
        let existing = vec![
            CompanyNode::at(1, 85.0, 0.0, 160.0),
            CompanyNode::at(1, 85.0, 180.0, 165.0),
        ];
        let outcome = plan_relocation(&CompanyNode::new(2, 95.0), &existing, &config(), &NoopObserver);
        assert_eq!(outcome.relocated_nodes.len(), 2);
        assert_eq!(outcome.stable_node_ids, vec![1]);
        let kept = outcome.relocated_nodes.iter().find(|n| n.id == 1).unwrap();
        assert_eq!(kept, &existing[0]);
    }

    #[test]
    fn test_processing_order_is_score_then_id() {
        let existing = vec![
            CompanyNode::at(3, 70.0, 0.0, 260.0),
            CompanyNode::at(2, 92.0, 40.0, 92.0),
            CompanyNode::at(1, 92.0, 200.0, 92.0),
        ];
        let outcome = plan_relocation(&CompanyNode::new(4, 85.0), &existing, &config(), &NoopObserver);
        let order: Vec<i64> = outcome.relocated_nodes.iter().map(|n| n.id).collect();
        assert_eq!(order, vec![1, 2, 4, 3]);
    }

    #[test]
    fn test_observer_records_stable_and_relocated() {
        let observer = RecordingObserver::default();
        let existing = vec![CompanyNode::at(1, 85.0, 0.0, 160.0)];
        plan_relocation(&CompanyNode::new(2, 95.0), &existing, &config(), &observer);
        assert_eq!(
            observer.take(),
            vec!["found:2:ideal", "relocated:2", "stable:1"]
        );
    }

    #[test]
    fn test_clustered_inserts_are_more_disruptive_than_spread_inserts() {
        // Rounds of 92, 91, 90, 89, 88: each newcomer is the weakest so far
        // in its round and must fit around everything already placed.
        let clustered: Vec<f64> = (0..20).map(|i| 92.0 - (i % 5) as f64).collect();
        let spread: Vec<f64> = (0..20)
            .map(|i| 10.0 + (i as f64 * 90.0 / 19.0).round())
            .collect();

        let observer = RecordingObserver::default();
        let (clustered_plans, _) = insert_sequentially(&clustered, &observer);
        let off_ring = observer
            .take()
            .iter()
            .filter(|e| e.ends_with(":relaxed") || e.ends_with(":fallback"))
            .count();
        assert!(off_ring >= 3, "only {off_ring} clustered placements left the ideal ring");

        let (spread_plans, _) = insert_sequentially(&spread, &observer);
        assert!(observer.take().iter().all(|e| !e.ends_with(":fallback")));

        let clustered_impact = estimate_impact(&clustered_plans, &config().impact);
        let spread_impact = estimate_impact(&spread_plans, &config().impact);
        assert!(
            clustered_impact > spread_impact,
            "clustered {clustered_impact} should exceed spread {spread_impact}"
        );
    }

    #[test]
    fn test_layout_all_places_everyone_without_ideal_collisions() {
        let nodes: Vec<CompanyNode> = (1..=12)
            .map(|id| CompanyNode::at(id, 40.0 + id as f64 * 5.0, 0.0, 0.0))
            .collect();
        let config = config();
        let placed = layout_all(&nodes, &config, &NoopObserver);

        assert_eq!(placed.len(), 12);
        assert_eq!(placed[0].id, 12, "best score is placed first");
        for (i, a) in placed.iter().enumerate() {
            let pa = a.valid_position().unwrap();
            for b in &placed[..i] {
                let pb = b.valid_position().unwrap();
                assert!(
                    separation(&pa, &pb) >= config.search.min_separation,
                    "{} and {} collide",
                    a.id,
                    b.id
                );
            }
        }
    }

    #[test]
    fn test_layout_all_is_deterministic_and_drops_duplicate_ids() {
        let nodes = vec![
            CompanyNode::new(1, 91.0),
            CompanyNode::new(2, 83.0),
            CompanyNode::new(1, 20.0),
        ];
        let first = layout_all(&nodes, &config(), &NoopObserver);
        let second = layout_all(&nodes, &config(), &NoopObserver);
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].match_score, 91.0);
    }
}
