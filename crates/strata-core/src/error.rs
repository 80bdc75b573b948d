// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Errors surfaced by engine construction and assembly preparation.

use thiserror::Error;

use crate::config::ConfigError;

/// Failure to build the engine or prepare an assembly.
///
/// A failed preparation never touches the previously prepared assembly.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExplodeError {
    /// The configuration failed validation.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    /// Plane mode names an anchor that the scene does not contain.
    #[error("anchor part `{0}` not found in scene")]
    AnchorNotFound(String),
    /// The named anchor exists but carries no geometry to derive a plane from.
    #[error("anchor `{0}` has no geometry")]
    AnchorWithoutGeometry(String),
}
