// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Arena-backed scene tree.

use std::fs;
use std::path::Path;

use strata_core::{PartId, PartKind, PartRecord, PartSink, SceneSource};
use strata_geom::{Aabb, Mat4, Quat, Transform, Vec3};
use tracing::{debug, trace};

use crate::desc::{MeshDesc, NodeDesc, SceneDesc};
use crate::error::SceneError;

/// Geometry attached to a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mesh {
    /// Bounds in node space.
    pub bounds: Aabb,
    /// Skinned meshes are reported as [`PartKind::Skinned`].
    pub skinned: bool,
}

impl Mesh {
    /// Rigid mesh with the given local bounds.
    pub fn rigid(bounds: Aabb) -> Self {
        Self {
            bounds,
            skinned: false,
        }
    }
}

#[derive(Debug, Clone)]
struct Node {
    name: String,
    parent: Option<PartId>,
    children: Vec<PartId>,
    transform: Transform,
    mesh: Option<Mesh>,
}

/// Scene graph owning every node in a flat arena.
///
/// Handles are arena indices. A parent is always created before its
/// children, so index order visits parents first.
#[derive(Debug, Clone, Default)]
pub struct SceneTree {
    nodes: Vec<Node>,
}

fn index(id: PartId) -> usize {
    id.0 as usize
}

impl SceneTree {
    /// Empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a tree from a parsed description, validating every node.
    pub fn from_desc(desc: &SceneDesc) -> Result<Self, SceneError> {
        let mut tree = Self::new();
        for node in &desc.nodes {
            tree.insert_desc(None, node)?;
        }
        debug!(
            nodes = tree.len(),
            parts = tree.nodes.iter().filter(|n| n.mesh.is_some()).count(),
            "scene loaded"
        );
        Ok(tree)
    }

    /// Parses a JSON description.
    pub fn from_json(text: &str) -> Result<Self, SceneError> {
        let desc: SceneDesc = serde_json::from_str(text)?;
        Self::from_desc(&desc)
    }

    /// Reads and parses a JSON description file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    fn insert_desc(&mut self, parent: Option<PartId>, desc: &NodeDesc) -> Result<PartId, SceneError> {
        let non_finite = |field| SceneError::NonFinite {
            name: desc.name.clone(),
            field,
        };
        let translation = desc.translation.unwrap_or([0.0; 3]);
        if !translation.iter().all(|c| c.is_finite()) {
            return Err(non_finite("translation"));
        }
        let rotation = desc.rotation.unwrap_or([0.0, 0.0, 0.0, 1.0]);
        if !rotation.iter().all(|c| c.is_finite()) {
            return Err(non_finite("rotation"));
        }
        let scale = desc.scale.unwrap_or([1.0; 3]);
        if !scale.iter().all(|c| c.is_finite()) {
            return Err(non_finite("scale"));
        }
        let mesh = desc.mesh.map(|m| mesh_from_desc(&desc.name, m)).transpose()?;

        let transform = Transform::new(
            Vec3::from(translation),
            Quat::from(rotation).normalize(),
            Vec3::from(scale),
        );
        let id = self.add_node(parent, desc.name.clone(), transform)?;
        self.nodes[index(id)].mesh = mesh;
        for child in &desc.children {
            self.insert_desc(Some(id), child)?;
        }
        Ok(id)
    }

    /// Appends a node under `parent` (or at the root).
    pub fn add_node(
        &mut self,
        parent: Option<PartId>,
        name: impl Into<String>,
        transform: Transform,
    ) -> Result<PartId, SceneError> {
        let id = PartId(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        if let Some(p) = parent {
            self.node_mut(p)?.children.push(id);
        }
        self.nodes.push(Node {
            name: name.into(),
            parent,
            children: Vec::new(),
            transform,
            mesh: None,
        });
        Ok(id)
    }

    /// Attaches (or removes) geometry on `id`.
    pub fn set_mesh(&mut self, id: PartId, mesh: Option<Mesh>) -> Result<(), SceneError> {
        self.node_mut(id)?.mesh = mesh;
        Ok(())
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// `true` when the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// First node called `name`, in traversal order.
    pub fn find(&self, name: &str) -> Option<PartId> {
        self.pre_order()
            .into_iter()
            .find(|id| self.nodes[index(*id)].name == name)
    }

    /// Node name.
    pub fn name(&self, id: PartId) -> Option<&str> {
        self.node(id).map(|n| n.name.as_str())
    }

    /// Parent handle; `None` for roots and unknown handles.
    pub fn parent(&self, id: PartId) -> Option<PartId> {
        self.node(id).and_then(|n| n.parent)
    }

    /// Direct children in insertion order.
    pub fn children(&self, id: PartId) -> &[PartId] {
        match self.node(id) {
            Some(n) => &n.children,
            None => &[],
        }
    }

    /// Geometry attached to `id`.
    pub fn mesh(&self, id: PartId) -> Option<&Mesh> {
        self.node(id).and_then(|n| n.mesh.as_ref())
    }

    /// Local transform.
    pub fn transform(&self, id: PartId) -> Option<&Transform> {
        self.node(id).map(|n| &n.transform)
    }

    /// Local translation.
    pub fn local_position(&self, id: PartId) -> Option<Vec3> {
        self.node(id).map(|n| n.transform.translation())
    }

    /// Local-to-world matrix, composed through every ancestor.
    pub fn world_matrix(&self, id: PartId) -> Option<Mat4> {
        let mut node = self.node(id)?;
        let mut world = node.transform.to_mat4();
        while let Some(parent) = node.parent {
            node = self.node(parent)?;
            world = node.transform.to_mat4().multiply(&world);
        }
        Some(world)
    }

    /// Every node's world matrix, indexed by handle.
    fn world_matrices(&self) -> Vec<Mat4> {
        let mut world: Vec<Mat4> = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            let local = node.transform.to_mat4();
            let m = match node.parent {
                Some(p) => world[index(p)].multiply(&local),
                None => local,
            };
            world.push(m);
        }
        world
    }

    /// World bounds of each node's own mesh and all descendant meshes.
    fn subtree_bounds(&self, world: &[Mat4]) -> Vec<Option<Aabb>> {
        let mut acc: Vec<Option<Aabb>> = self
            .nodes
            .iter()
            .zip(world)
            .map(|(n, m)| n.mesh.map(|mesh| mesh.bounds.transformed(m)))
            .collect();
        for i in (0..self.nodes.len()).rev() {
            let (Some(parent), Some(child)) = (self.nodes[i].parent, acc[i]) else {
                continue;
            };
            let slot = &mut acc[index(parent)];
            *slot = Some(slot.map_or(child, |b| b.union(&child)));
        }
        acc
    }

    /// Handles in depth-first pre-order, roots in insertion order.
    pub fn pre_order(&self) -> Vec<PartId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<PartId> = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.parent.is_none())
            .map(|(i, _)| PartId(u32::try_from(i).unwrap_or(u32::MAX)))
            .rev()
            .collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    /// Serializable snapshot of the current tree (including any positions
    /// written by the engine).
    pub fn to_desc(&self) -> SceneDesc {
        let nodes = self
            .pre_order()
            .into_iter()
            .filter(|id| self.parent(*id).is_none())
            .map(|id| self.node_desc(id))
            .collect();
        SceneDesc { name: None, nodes }
    }

    fn node_desc(&self, id: PartId) -> NodeDesc {
        let node = &self.nodes[index(id)];
        let t = &node.transform;
        let translation = t.translation();
        let rotation = t.rotation();
        let scale = t.scale();
        NodeDesc {
            name: node.name.clone(),
            translation: (translation != Vec3::ZERO).then(|| translation.to_array()),
            rotation: (rotation != Quat::identity()).then(|| rotation.to_array()),
            scale: (scale != Vec3::splat(1.0)).then(|| scale.to_array()),
            mesh: node.mesh.map(|m| MeshDesc {
                min: m.bounds.min().to_array(),
                max: m.bounds.max().to_array(),
                skinned: m.skinned,
            }),
            children: node.children.iter().map(|c| self.node_desc(*c)).collect(),
        }
    }

    fn node(&self, id: PartId) -> Option<&Node> {
        self.nodes.get(index(id))
    }

    fn node_mut(&mut self, id: PartId) -> Result<&mut Node, SceneError> {
        self.nodes
            .get_mut(index(id))
            .ok_or(SceneError::UnknownNode(id))
    }
}

fn mesh_from_desc(name: &str, mesh: MeshDesc) -> Result<Mesh, SceneError> {
    if !mesh.min.iter().chain(&mesh.max).all(|c| c.is_finite()) {
        return Err(SceneError::NonFinite {
            name: name.to_owned(),
            field: "mesh bounds",
        });
    }
    let bounds = Aabb::try_new(Vec3::from(mesh.min), Vec3::from(mesh.max)).ok_or_else(|| {
        SceneError::InvalidBounds {
            name: name.to_owned(),
            min: mesh.min,
            max: mesh.max,
        }
    })?;
    Ok(Mesh {
        bounds,
        skinned: mesh.skinned,
    })
}

impl SceneSource for SceneTree {
    fn parts(&self) -> Vec<PartRecord> {
        let world = self.world_matrices();
        let bounds = self.subtree_bounds(&world);
        self.pre_order()
            .into_iter()
            .filter_map(|id| {
                let i = index(id);
                let node = &self.nodes[i];
                let mesh = node.mesh?;
                let world_bounds = bounds[i]?;
                Some(PartRecord {
                    id,
                    name: node.name.clone(),
                    kind: if mesh.skinned {
                        PartKind::Skinned
                    } else {
                        PartKind::Rigid
                    },
                    local_bounds: mesh.bounds,
                    world_bounds,
                    world_matrix: world[i],
                })
            })
            .collect()
    }

    fn assembly_bounds(&self) -> Option<Aabb> {
        let world = self.world_matrices();
        let own: Vec<Aabb> = self
            .nodes
            .iter()
            .zip(&world)
            .filter_map(|(n, m)| n.mesh.map(|mesh| mesh.bounds.transformed(m)))
            .collect();
        Aabb::union_all(&own)
    }

    fn contains_name(&self, name: &str) -> bool {
        self.find(name).is_some()
    }
}

impl PartSink for SceneTree {
    fn parent_world_to_local(&self, part: PartId) -> Option<Mat4> {
        let node = self.node(part)?;
        match node.parent {
            Some(parent) => self.world_matrix(parent)?.inverse(),
            None => Some(Mat4::identity()),
        }
    }

    fn set_local_position(&mut self, part: PartId, local: Vec3) {
        match self.nodes.get_mut(index(part)) {
            Some(node) => node.transform.set_translation(local),
            None => trace!(%part, "position for unknown node ignored"),
        }
    }
}
