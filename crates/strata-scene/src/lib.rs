// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! In-memory scene tree for the Strata explosion engine.
//!
//! [`SceneTree`] stands in for a renderer's node store: it classifies mesh
//! nodes into parts for [`strata_core::SceneSource`] and accepts local
//! positions through [`strata_core::PartSink`]. Trees are built by hand or
//! loaded from a JSON [`SceneDesc`].

mod desc;
mod error;
mod tree;

pub use desc::{MeshDesc, NodeDesc, SceneDesc};
pub use error::SceneError;
pub use tree::{Mesh, SceneTree};
