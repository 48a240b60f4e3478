use serde::{Deserialize, Serialize};

/// A point on the radial graph relative to the central "self" node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolarPosition {
    /// Degrees in `[0, 360)`.
    pub angle: f64,
    /// Pixels from the centre.
    pub distance: f64,
}

impl PolarPosition {
    /// False for NaN/infinite components or a negative distance.
    pub fn is_valid(&self) -> bool {
        self.angle.is_finite() && self.distance.is_finite() && self.distance >= 0.0
    }
}

/// One company placed (or waiting to be placed) on the radial graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyNode {
    /// Stable across re-layouts.
    pub id: i64,
    /// 0 – 100, supplied by the discovery pipeline.
    pub match_score: f64,
    /// `None` until the node has been laid out at least once.
    #[serde(default)]
    pub position: Option<PolarPosition>,
}

impl CompanyNode {
    pub fn new(id: i64, match_score: f64) -> Self {
        Self {
            id,
            match_score,
            position: None,
        }
    }

    pub fn at(id: i64, match_score: f64, angle: f64, distance: f64) -> Self {
        Self {
            id,
            match_score,
            position: Some(PolarPosition { angle, distance }),
        }
    }

    /// The stored position, or `None` if it is missing or malformed.
    pub fn valid_position(&self) -> Option<PolarPosition> {
        self.position.filter(PolarPosition::is_valid)
    }

    /// Score clamped to `[0, 100]`; NaN counts as 0.
    pub fn clamped_score(&self) -> f64 {
        clamp_score(self.match_score)
    }
}

/// Upstream scores are LLM-derived and not guaranteed to be in range.
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 100.0)
    }
}
