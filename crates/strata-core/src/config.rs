// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Engine configuration: explosion variant, geometric tolerances and
//! dimensionless travel fractions.
//!
//! Every value is injected rather than derived from the loaded assembly, so
//! one configuration can drive differently-scaled models. Tolerances
//! (`sameLayerTolerance`, `nearGapForAdjacency`, `nearBandExclusion`) are
//! absolute lengths and are *not* rescaled by assembly size; very large or
//! very small models may need tuned values.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the anchor part used when none is configured.
pub const DEFAULT_ANCHOR: &str = "bottom";

/// Error returned when a configuration value would make the engine produce
/// NaN or degenerate displacements.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A numeric field is outside its accepted range.
    #[error("invalid `{field}` = {value}: {reason}")]
    OutOfRange {
        /// camelCase field name as it appears in JSON.
        field: &'static str,
        /// Offending value.
        value: f32,
        /// Accepted range, in words.
        reason: &'static str,
    },
    /// Plane mode was selected without naming an anchor part.
    #[error("plane mode requires a non-empty anchor name")]
    EmptyAnchor,
}

/// Which displacement model the engine runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ExplodeMode {
    /// Clusters travel along the normal of a plane derived from `anchor`,
    /// proportionally to their depth from it. The anchor never moves.
    Plane {
        /// Name of the thin reference part the plane is built from.
        anchor: String,
    },
    /// Each part travels on its own, away from the assembly center, by a
    /// distance proportional to assembly size.
    Radial,
}

impl Default for ExplodeMode {
    fn default() -> Self {
        Self::Plane {
            anchor: DEFAULT_ANCHOR.to_owned(),
        }
    }
}

/// Tunables for clustering, travel and smoothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExplodeConfig {
    /// Displacement model.
    pub mode: ExplodeMode,
    /// Signed shift of the reference plane along its normal.
    pub plane_offset: f32,
    /// Farthest cluster travels this fraction of the assembly diagonal.
    pub max_travel_fraction: f32,
    /// Depth-independent push, as a fraction of the assembly diagonal.
    pub base_push_fraction: f32,
    /// Radial travel at full explosion, as a fraction of the assembly diagonal.
    pub radial_fraction: f32,
    /// Floor applied to cluster depth extents.
    pub epsilon_on_plane: f32,
    /// Gap by which boxes are inflated when testing adjacency.
    #[serde(alias = "nearGap")]
    pub near_gap_for_adjacency: f32,
    /// Maximum center-depth difference for two parts to share a layer.
    pub same_layer_tolerance: f32,
    /// Clusters shallower than this stay assembled.
    #[serde(alias = "nearBand")]
    pub near_band_exclusion: f32,
    /// Exponential approach rate of the explosion factor, per second.
    pub smoothing_rate: f32,
    /// Target change per wheel notch.
    pub wheel_step_size: f32,
}

impl Default for ExplodeConfig {
    fn default() -> Self {
        Self {
            mode: ExplodeMode::default(),
            plane_offset: -0.008,
            max_travel_fraction: 0.4,
            base_push_fraction: 0.02,
            radial_fraction: 0.5,
            epsilon_on_plane: 1e-5,
            near_gap_for_adjacency: 0.015,
            same_layer_tolerance: 0.0007,
            near_band_exclusion: 0.002,
            smoothing_rate: 6.0,
            wheel_step_size: 0.06,
        }
    }
}

impl ExplodeConfig {
    /// Default tunables in plane mode with the given anchor.
    pub fn plane(anchor: impl Into<String>) -> Self {
        Self {
            mode: ExplodeMode::Plane {
                anchor: anchor.into(),
            },
            ..Self::default()
        }
    }

    /// Default tunables in radial mode.
    pub fn radial() -> Self {
        Self {
            mode: ExplodeMode::Radial,
            ..Self::default()
        }
    }

    /// Anchor name when running in plane mode.
    pub fn anchor(&self) -> Option<&str> {
        match &self.mode {
            ExplodeMode::Plane { anchor } => Some(anchor),
            ExplodeMode::Radial => None,
        }
    }

    /// Checks every field, reporting the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let ExplodeMode::Plane { anchor } = &self.mode {
            if anchor.trim().is_empty() {
                return Err(ConfigError::EmptyAnchor);
            }
        }
        finite("planeOffset", self.plane_offset)?;
        non_negative("maxTravelFraction", self.max_travel_fraction)?;
        non_negative("basePushFraction", self.base_push_fraction)?;
        non_negative("radialFraction", self.radial_fraction)?;
        positive("epsilonOnPlane", self.epsilon_on_plane)?;
        non_negative("nearGapForAdjacency", self.near_gap_for_adjacency)?;
        non_negative("sameLayerTolerance", self.same_layer_tolerance)?;
        non_negative("nearBandExclusion", self.near_band_exclusion)?;
        positive("smoothingRate", self.smoothing_rate)?;
        positive("wheelStepSize", self.wheel_step_size)?;
        Ok(())
    }

    /// Consumes the config, returning it only if [`ExplodeConfig::validate`]
    /// passes.
    pub fn validated(self) -> Result<Self, ConfigError> {
        self.validate()?;
        Ok(self)
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            reason: "must be finite",
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            reason: "must be finite and >= 0",
        })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            reason: "must be finite and > 0",
        })
    }
}
