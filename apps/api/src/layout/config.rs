//! Tunable constants for the radial layout.
//!
//! The defaults were tuned for a ~900px square canvas. They are plain data so
//! a caller drawing at another scale can re-tune them instead of patching the
//! algorithms.

use serde::{Deserialize, Serialize};

use crate::errors::LayoutError;

// ────────────────────────────────────────────────────────────────────────────
// Score rings
// ────────────────────────────────────────────────────────────────────────────

/// Inner and outer radius of one concentric band, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    pub inner: f64,
    pub outer: f64,
}

/// Radii of the four score bands. Must be strictly increasing and disjoint
/// so the legend rings never overlap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreRings {
    pub excellent: Ring,
    pub good: Ring,
    pub fair: Ring,
    pub developing: Ring,
}

impl Default for ScoreRings {
    fn default() -> Self {
        Self {
            excellent: Ring {
                inner: 60.0,
                outer: 100.0,
            },
            good: Ring {
                inner: 140.0,
                outer: 180.0,
            },
            fair: Ring {
                inner: 220.0,
                outer: 260.0,
            },
            developing: Ring {
                inner: 300.0,
                outer: 440.0,
            },
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Search / relocation / impact / animation
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Two node centres closer than this collide.
    pub min_separation: f64,
    /// Degrees between consecutive candidate angles in a sweep.
    pub angle_step: f64,
    /// Multiplier turning a node id into its reproducible seed angle.
    pub seed_multiplier: i64,
    /// Outward offsets tried, in order, when the ideal ring is full.
    pub relax_offsets: Vec<f64>,
    /// Width of the sectors counted by the fallback.
    pub sector_degrees: f64,
    /// How far beyond the ideal ring a fallback placement lands.
    pub fallback_distance_cap: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_separation: 60.0,
            angle_step: 12.0,
            seed_multiplier: 137,
            relax_offsets: vec![15.0, 30.0, 45.0],
            sector_degrees: 45.0,
            fallback_distance_cap: 60.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelocationConfig {
    /// Distance error (px) a node may carry before it is repositioned.
    pub reposition_tolerance: f64,
    /// Errors above this are high priority.
    pub high_priority_error: f64,
    /// Errors above this (and up to `high_priority_error`) are medium priority.
    pub medium_priority_error: f64,
}

impl Default for RelocationConfig {
    fn default() -> Self {
        Self {
            reposition_tolerance: 20.0,
            high_priority_error: 50.0,
            medium_priority_error: 30.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpactConfig {
    /// Radial moves read as more disruptive than rotation.
    pub radial_weight: f64,
}

impl Default for ImpactConfig {
    fn default() -> Self {
        Self { radial_weight: 1.5 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub high_stagger_ms: u64,
    pub medium_stagger_ms: u64,
    pub low_stagger_ms: u64,
    /// Pause between the last move of one tier and the first of the next.
    pub tier_gap_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            high_stagger_ms: 40,
            medium_stagger_ms: 60,
            low_stagger_ms: 80,
            tier_gap_ms: 120,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Top-level config
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub rings: ScoreRings,
    pub search: SearchConfig,
    pub relocation: RelocationConfig,
    pub impact: ImpactConfig,
    pub animation: AnimationConfig,
}

impl LayoutConfig {
    /// Rejects configurations that would break monotonicity or make the
    /// search loops degenerate.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let rings = [
            ("excellent", self.rings.excellent),
            ("good", self.rings.good),
            ("fair", self.rings.fair),
            ("developing", self.rings.developing),
        ];
        let mut previous_outer: Option<(&str, f64)> = None;
        for (name, ring) in rings {
            if !ring.inner.is_finite() || !ring.outer.is_finite() || ring.inner < 0.0 {
                return Err(LayoutError::InvalidConfig(format!(
                    "{name} ring radii must be finite and non-negative"
                )));
            }
            if ring.inner > ring.outer {
                return Err(LayoutError::InvalidConfig(format!(
                    "{name} ring inner radius {} exceeds outer radius {}",
                    ring.inner, ring.outer
                )));
            }
            if let Some((prev_name, prev_outer)) = previous_outer {
                if ring.inner <= prev_outer {
                    return Err(LayoutError::InvalidConfig(format!(
                        "{name} ring overlaps the {prev_name} ring"
                    )));
                }
            }
            previous_outer = Some((name, ring.outer));
        }

        let search = &self.search;
        require_positive("search.min_separation", search.min_separation)?;
        require_positive("search.angle_step", search.angle_step)?;
        require_positive("search.sector_degrees", search.sector_degrees)?;
        require_non_negative("search.fallback_distance_cap", search.fallback_distance_cap)?;
        if search.angle_step > 360.0 || search.sector_degrees > 360.0 {
            return Err(LayoutError::InvalidConfig(
                "angle_step and sector_degrees must not exceed 360".to_string(),
            ));
        }
        for offset in &search.relax_offsets {
            require_non_negative("search.relax_offsets", *offset)?;
        }

        let relocation = &self.relocation;
        require_non_negative(
            "relocation.reposition_tolerance",
            relocation.reposition_tolerance,
        )?;
        require_non_negative(
            "relocation.medium_priority_error",
            relocation.medium_priority_error,
        )?;
        if relocation.high_priority_error < relocation.medium_priority_error
            || !relocation.high_priority_error.is_finite()
        {
            return Err(LayoutError::InvalidConfig(
                "relocation.high_priority_error must be finite and >= medium_priority_error"
                    .to_string(),
            ));
        }

        require_non_negative("impact.radial_weight", self.impact.radial_weight)?;
        Ok(())
    }
}

fn require_positive(field: &str, value: f64) -> Result<(), LayoutError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(LayoutError::InvalidConfig(format!(
            "{field} must be a positive number, got {value}"
        )))
    }
}

fn require_non_negative(field: &str, value: f64) -> Result<(), LayoutError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(LayoutError::InvalidConfig(format!(
            "{field} must be a non-negative number, got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(LayoutConfig::default().validate().is_ok());
    }

    #[test]
    fn test_overlapping_rings_rejected() {
        let mut config = LayoutConfig::default();
        config.rings.good.inner = 90.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("overlaps"), "got: {err}");
    }

    #[test]
    fn test_inverted_ring_rejected() {
        let mut config = LayoutConfig::default();
        config.rings.fair.outer = 200.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_angle_step_rejected() {
        let mut config = LayoutConfig::default();
        config.search.angle_step = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_nan_separation_rejected() {
        let mut config = LayoutConfig::default();
        config.search.min_separation = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_priority_bands_must_be_ordered() {
        let mut config = LayoutConfig::default();
        config.relocation.high_priority_error = 10.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: LayoutConfig =
            serde_json::from_str(r#"{"search": {"min_separation": 48}}"#).unwrap();
        assert_eq!(config.search.min_separation, 48.0);
        assert_eq!(config.search.angle_step, 12.0);
        assert_eq!(config.relocation.reposition_tolerance, 20.0);
        assert_eq!(config.rings, ScoreRings::default());
    }
}
