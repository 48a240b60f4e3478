//! Score-to-distance mapping and the score bands shown in the graph legend.
//!
//! Each band owns one concentric ring. Inside a band the score interpolates
//! linearly, a higher score sitting nearer the ring's inner edge. Because the
//! rings are disjoint and ordered, the mapping is monotonically non-increasing
//! across the whole 0–100 range.

use serde::{Deserialize, Serialize};

use crate::layout::config::{Ring, ScoreRings};
use crate::models::company::clamp_score;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    /// 90 – 100
    Excellent,
    /// 80 – 89
    Good,
    /// 70 – 79
    Fair,
    /// Below 70
    Developing,
}

impl ScoreBand {
    pub const ALL: [ScoreBand; 4] = [
        ScoreBand::Excellent,
        ScoreBand::Good,
        ScoreBand::Fair,
        ScoreBand::Developing,
    ];

    pub fn for_score(score: f64) -> Self {
        let score = clamp_score(score);
        if score >= 90.0 {
            ScoreBand::Excellent
        } else if score >= 80.0 {
            ScoreBand::Good
        } else if score >= 70.0 {
            ScoreBand::Fair
        } else {
            ScoreBand::Developing
        }
    }

    /// Half-open score range `[low, high)`; the excellent band includes 100.
    pub fn score_range(self) -> (f64, f64) {
        match self {
            ScoreBand::Excellent => (90.0, 100.0),
            ScoreBand::Good => (80.0, 90.0),
            ScoreBand::Fair => (70.0, 80.0),
            ScoreBand::Developing => (0.0, 70.0),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Excellent match",
            ScoreBand::Good => "Good match",
            ScoreBand::Fair => "Fair match",
            ScoreBand::Developing => "Developing match",
        }
    }

    pub fn ring(self, rings: &ScoreRings) -> Ring {
        match self {
            ScoreBand::Excellent => rings.excellent,
            ScoreBand::Good => rings.good,
            ScoreBand::Fair => rings.fair,
            ScoreBand::Developing => rings.developing,
        }
    }
}

/// Ideal distance from the centre for a match score.
pub fn distance_for_score(score: f64, rings: &ScoreRings) -> f64 {
    let score = clamp_score(score);
    let band = ScoreBand::for_score(score);
    let (low, high) = band.score_range();
    let ring = band.ring(rings);
    let t = (high - score) / (high - low);
    ring.inner + t * (ring.outer - ring.inner)
}

/// One legend entry: what a ring means and where it is drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendRing {
    pub band: ScoreBand,
    pub label: String,
    pub min_score: f64,
    pub max_score: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
}

/// Legend rows, innermost first.
pub fn legend(rings: &ScoreRings) -> Vec<LegendRing> {
    ScoreBand::ALL
        .iter()
        .map(|&band| {
            let (min_score, max_score) = band.score_range();
            let ring = band.ring(rings);
            LegendRing {
                band,
                label: band.label().to_string(),
                min_score,
                max_score,
                inner_radius: ring.inner,
                outer_radius: ring.outer,
            }
        })
        .collect()
}
