// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Serializable scene description.
//!
//! ```json
//! {
//!   "nodes": [
//!     { "name": "bottom", "mesh": { "min": [-1, -0.05, -1], "max": [1, 0.05, 1] } },
//!     { "name": "lid", "translation": [0, 1, 0],
//!       "children": [ { "name": "knob", "mesh": { "min": [-0.1, 0, -0.1], "max": [0.1, 0.2, 0.1] } } ] }
//!   ]
//! }
//! ```
//!
//! Nodes without `mesh` are pure groups. Omitted transform components default
//! to identity; `rotation` is an `[x, y, z, w]` quaternion.

use serde::{Deserialize, Serialize};

/// Root of a scene description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneDesc {
    /// Optional display name of the assembly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Top-level nodes.
    #[serde(default)]
    pub nodes: Vec<NodeDesc>,
}

/// One node of the description tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeDesc {
    /// Node name; used to resolve the anchor part.
    pub name: String,
    /// Translation in the parent's space.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<[f32; 3]>,
    /// Rotation quaternion `[x, y, z, w]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<[f32; 4]>,
    /// Non-uniform scale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<[f32; 3]>,
    /// Geometry carried by this node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh: Option<MeshDesc>,
    /// Child nodes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeDesc>,
}

/// Geometry summary: local bounds and a skinning flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MeshDesc {
    /// Minimum corner in node space.
    pub min: [f32; 3],
    /// Maximum corner in node space.
    pub max: [f32; 3],
    /// Skinned meshes are never displaced.
    #[serde(default, skip_serializing_if = "core::ops::Not::not")]
    pub skinned: bool,
}
