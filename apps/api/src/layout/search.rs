//! Collision-aware angle search.
//!
//! Finds where a company should sit on its ring without landing on top of an
//! already placed company:
//!
//! 1. Start at a seed angle derived from the node id, so re-running a layout
//!    over the same data gives the same picture.
//! 2. Sweep the full circle in fixed steps on the ideal ring.
//! 3. If the ring is full, repeat the sweep on a few slightly larger rings.
//! 4. If everything is full, park the node in the least crowded sector just
//!    outside its ring.
//!
//! Worst case is `sweep_steps × (1 + relax_offsets) × placed` distance checks.

use crate::layout::config::{LayoutConfig, SearchConfig};
use crate::layout::geometry::{normalize_angle, separation};
use crate::models::company::{CompanyNode, PolarPosition};
use crate::models::relocation::{Placement, PlacementStrategy};
use crate::telemetry::{LayoutEvent, LayoutObserver};

/// Reproducible starting angle for a node.
pub fn seed_angle(candidate_id: i64, config: &SearchConfig) -> f64 {
    // Reduce both factors first so the product cannot overflow.
    let id = candidate_id.rem_euclid(360);
    let multiplier = config.seed_multiplier.rem_euclid(360);
    ((id * multiplier) % 360) as f64
}

/// Picks a collision-free position for `candidate_id` near `target_distance`.
///
/// Placed nodes without a valid position, and any placed node sharing the
/// candidate's id, impose no constraint. A non-finite target is treated as
/// the outer edge of the outermost ring. Never fails.
pub fn find_position(
    target_distance: f64,
    candidate_id: i64,
    placed: &[CompanyNode],
    layout: &LayoutConfig,
    observer: &dyn LayoutObserver,
) -> Placement {
    let config = &layout.search;
    let target_distance = if target_distance.is_finite() {
        target_distance.max(0.0)
    } else {
        layout.rings.developing.outer
    };

    let obstacles: Vec<PolarPosition> = placed
        .iter()
        .filter(|node| node.id != candidate_id)
        .filter_map(CompanyNode::valid_position)
        .collect();

    let start = seed_angle(candidate_id, config);
    let placement = sweep(target_distance, start, &obstacles, config)
        .unwrap_or_else(|| fallback_sector(target_distance, candidate_id, start, &obstacles, config));

    observer.on_event(LayoutEvent::PositionFound {
        node_id: candidate_id,
        target_distance,
        placement: &placement,
    });
    placement
}

/// Tries the ideal ring, then each relaxed ring, in order.
fn sweep(
    target_distance: f64,
    start: f64,
    obstacles: &[PolarPosition],
    config: &SearchConfig,
) -> Option<Placement> {
    let steps = (360.0 / config.angle_step).ceil() as usize;
    let rings = std::iter::once((target_distance, None)).chain(
        config
            .relax_offsets
            .iter()
            .map(|&offset| (target_distance + offset, Some(offset))),
    );

    for (distance, offset) in rings {
        for step in 0..steps {
            let candidate = PolarPosition {
                angle: normalize_angle(start + step as f64 * config.angle_step),
                distance,
            };
            if is_clear(&candidate, obstacles, config.min_separation) {
                let strategy = match offset {
                    None => PlacementStrategy::Ideal,
                    Some(offset) => PlacementStrategy::Relaxed { offset },
                };
                return Some(Placement {
                    position: candidate,
                    strategy,
                });
            }
        }
    }
    None
}

fn is_clear(candidate: &PolarPosition, obstacles: &[PolarPosition], min_separation: f64) -> bool {
    obstacles
        .iter()
        .all(|obstacle| separation(candidate, obstacle) >= min_separation)
}

/// Last resort: the emptiest sector, just outside the ideal ring.
///
/// Ties go to the first sector reached scanning clockwise from the seed's
/// sector. The angle inside the sector is jittered by a hash of the id, so
/// two nodes falling back into the same sector do not stack exactly.
fn fallback_sector(
    target_distance: f64,
    candidate_id: i64,
    start: f64,
    obstacles: &[PolarPosition],
    config: &SearchConfig,
) -> Placement {
    let sector_count = (360.0 / config.sector_degrees).ceil().max(1.0) as usize;
    let mut counts = vec![0usize; sector_count];
    for obstacle in obstacles {
        counts[sector_of(obstacle.angle, config.sector_degrees, sector_count)] += 1;
    }

    let first = sector_of(start, config.sector_degrees, sector_count);
    let sector = (0..sector_count)
        .map(|i| (first + i) % sector_count)
        .min_by_key(|&s| counts[s])
        .unwrap_or(first);

    let centre = sector as f64 * config.sector_degrees + config.sector_degrees / 2.0;
    let jitter = (id_jitter(candidate_id) - 0.5) * config.sector_degrees / 2.0;

    Placement {
        position: PolarPosition {
            angle: normalize_angle(centre + jitter),
            distance: target_distance + config.fallback_distance_cap,
        },
        strategy: PlacementStrategy::FallbackSector { sector },
    }
}

fn sector_of(angle: f64, sector_degrees: f64, sector_count: usize) -> usize {
    ((normalize_angle(angle) / sector_degrees) as usize).min(sector_count - 1)
}

/// Deterministic value in `[0, 1)` derived from the id (Knuth multiplicative hash).
fn id_jitter(candidate_id: i64) -> f64 {
    let hashed = (candidate_id as u64).wrapping_mul(2_654_435_761) % 1000;
    hashed as f64 / 1000.0
}
