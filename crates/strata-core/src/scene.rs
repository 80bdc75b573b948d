// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Ports between the engine and the scene representation that owns parts.
//!
//! The engine never walks a scene graph itself. A [`SceneSource`] classifies
//! nodes while traversing and hands over plain [`PartRecord`]s; a
//! [`PartSink`] receives the resulting local positions. Adapters (an
//! in-memory tree, a renderer's node store) implement both.

use core::fmt;
use strata_geom::{Aabb, Mat4, Vec3};

/// Stable handle of a part inside its scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PartId(pub u32);

impl fmt::Display for PartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Classification assigned at traversal time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PartKind {
    /// Rigid geometric body; eligible for displacement.
    Rigid,
    /// Skinned / deformable body; never displaced.
    Skinned,
}

/// Snapshot of one geometry-bearing node, taken at load time.
#[derive(Clone, Debug, PartialEq)]
pub struct PartRecord {
    /// Scene handle used when writing positions back.
    pub id: PartId,
    /// Node name (used to resolve the anchor).
    pub name: String,
    /// Traversal-time classification.
    pub kind: PartKind,
    /// Geometry bounds in the part's own space.
    pub local_bounds: Aabb,
    /// World-space bounds of the part and its descendants.
    pub world_bounds: Aabb,
    /// Local-to-world matrix.
    pub world_matrix: Mat4,
}

impl PartRecord {
    /// World-space origin of the part (translation of its world matrix).
    pub fn world_origin(&self) -> Vec3 {
        self.world_matrix.translation_part()
    }

    /// Center of the part's world bounds.
    pub fn world_center(&self) -> Vec3 {
        self.world_bounds.center()
    }

    /// Whether the engine may move this part.
    pub fn is_rigid(&self) -> bool {
        self.kind == PartKind::Rigid
    }
}

/// Read side of the scene: part discovery and assembly bounds.
pub trait SceneSource {
    /// Every geometry-bearing node exactly once, in a stable traversal order
    /// that lists ancestors before their descendants (pre-order).
    ///
    /// [`crate::Exploder::apply`] writes positions in this order.
    fn parts(&self) -> Vec<PartRecord>;

    /// World bounds of the whole assembly, or `None` when it has no geometry.
    fn assembly_bounds(&self) -> Option<Aabb>;

    /// Whether any node (geometry-bearing or not) is called `name`.
    ///
    /// Lets the engine tell a missing anchor from one without geometry.
    /// Sources that only know parts may keep the default.
    fn contains_name(&self, name: &str) -> bool {
        self.parts().iter().any(|p| p.name == name)
    }
}

/// Write side of the scene: local-position updates.
pub trait PartSink {
    /// Current world-to-local matrix of `part`'s parent (identity for root
    /// parts). `None` when the handle is unknown to this sink.
    fn parent_world_to_local(&self, part: PartId) -> Option<Mat4>;

    /// Replaces the local translation of `part`.
    fn set_local_position(&mut self, part: PartId, local: Vec3);
}
