// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scene loading errors.

use strata_core::PartId;
use thiserror::Error;

/// Failure to build or load a scene tree.
#[derive(Debug, Error)]
pub enum SceneError {
    /// The description is not valid JSON or does not match the schema.
    #[error("malformed scene description: {0}")]
    Parse(#[from] serde_json::Error),
    /// Reading the description from disk failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// A mesh has `min > max` on some axis.
    #[error("node `{name}`: mesh min {min:?} exceeds max {max:?}")]
    InvalidBounds {
        /// Offending node.
        name: String,
        /// Declared minimum corner.
        min: [f32; 3],
        /// Declared maximum corner.
        max: [f32; 3],
    },
    /// A transform or mesh component is NaN or infinite.
    #[error("node `{name}`: non-finite {field}")]
    NonFinite {
        /// Offending node.
        name: String,
        /// Which component.
        field: &'static str,
    },
    /// A handle does not belong to this tree.
    #[error("unknown node {0}")]
    UnknownNode(PartId),
}
