//! Bake configuration

use super::AoError;
use crate::grid::{DEFAULT_MAX_CELL_COUNT, MAX_CELL_COUNT_LIMIT};
use serde::{Deserialize, Serialize};

/// How per-direction hits are averaged into the final value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleWeighting {
    /// Every hemisphere direction counts equally: `1 - hits / samples`
    #[default]
    Uniform,
    /// Directions are weighted by their doubled quadrature weight:
    /// `1 - Σ w_hit / Σ w`, clamped to `[0, 1]`
    Quadrature,
}

/// Configuration for ambient occlusion baking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AoConfig {
    /// Lebedev rule index selecting the sample directions (1..=15)
    pub lebedev_rule: u32,
    /// Number of grid cells along the longest axis of the surface
    /// (1..=[`MAX_CELL_COUNT_LIMIT`])
    pub max_cell_count: u32,
    /// Averaging of occluded directions
    pub weighting: SampleWeighting,
    /// Skip triangles already tested for the current ray
    pub deduplicate: bool,
    /// Spread vertices over the rayon thread pool
    pub parallel: bool,
}

impl Default for AoConfig {
    fn default() -> Self {
        AoConfig {
            lebedev_rule: 8,
            max_cell_count: DEFAULT_MAX_CELL_COUNT,
            weighting: SampleWeighting::Uniform,
            deduplicate: false,
            parallel: true,
        }
    }
}

impl AoConfig {
    /// Coarse preset for interactive previews (13 directions)
    pub fn preview() -> Self {
        AoConfig {
            lebedev_rule: 4,
            max_cell_count: 20,
            ..Default::default()
        }
    }

    /// Dense serial bake over Lebedev rule 15 (165 directions)
    pub fn reference() -> Self {
        AoConfig {
            lebedev_rule: 15,
            parallel: false,
            ..Default::default()
        }
    }

    /// Quadrature-weighted average with per-ray deduplication
    pub fn high_quality() -> Self {
        AoConfig {
            lebedev_rule: 8,
            max_cell_count: 40,
            weighting: SampleWeighting::Quadrature,
            deduplicate: true,
            parallel: true,
        }
    }

    /// Check fields that would make the grid unbuildable
    pub fn validate(&self) -> Result<(), AoError> {
        if !(1..=MAX_CELL_COUNT_LIMIT).contains(&self.max_cell_count) {
            return Err(AoError::InvalidCellCount(self.max_cell_count));
        }
        Ok(())
    }

    /// Parse from JSON; missing fields take their default
    pub fn from_json(json: &str) -> Result<Self, AoError> {
        let config: AoConfig =
            serde_json::from_str(json).map_err(|e| AoError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, AoError> {
        serde_json::to_string_pretty(self).map_err(|e| AoError::Config(e.to_string()))
    }
}
