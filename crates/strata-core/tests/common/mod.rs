// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(dead_code)]
use std::collections::BTreeMap;

use strata_core::{PartId, PartKind, PartRecord, PartSink, SceneSource};
use strata_geom::{Aabb, Mat4, Vec3};

/// Flat test scene: boxes either at the root or under a fixed parent matrix.
#[derive(Default)]
pub struct FixtureScene {
    parts: Vec<PartRecord>,
    parents: BTreeMap<PartId, Mat4>,
    pub locals: BTreeMap<PartId, Vec3>,
}

impl FixtureScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Root-level box whose origin sits at its center.
    pub fn add_box(&mut self, name: &str, center: Vec3, half: Vec3) -> PartId {
        self.push(name, Mat4::identity(), center, half)
    }

    /// Box placed at `local_center` under a parent with world matrix `parent`.
    pub fn add_child_box(&mut self, name: &str, parent: Mat4, local_center: Vec3, half: Vec3) -> PartId {
        let id = self.push(name, parent, local_center, half);
        self.parents.insert(id, parent);
        id
    }

    pub fn set_kind(&mut self, id: PartId, kind: PartKind) {
        if let Some(p) = self.parts.iter_mut().find(|p| p.id == id) {
            p.kind = kind;
        }
    }

    pub fn local(&self, id: PartId) -> Option<Vec3> {
        self.locals.get(&id).copied()
    }

    fn push(&mut self, name: &str, parent: Mat4, local_center: Vec3, half: Vec3) -> PartId {
        let id = PartId(u32::try_from(self.parts.len()).unwrap_or(u32::MAX));
        let [cx, cy, cz] = local_center.to_array();
        let world = parent.multiply(&Mat4::translation(cx, cy, cz));
        let local_bounds = Aabb::from_center_half_extents(Vec3::ZERO, half.x(), half.y(), half.z());
        self.parts.push(PartRecord {
            id,
            name: name.to_owned(),
            kind: PartKind::Rigid,
            local_bounds,
            world_bounds: local_bounds.transformed(&world),
            world_matrix: world,
        });
        self.locals.insert(id, local_center);
        id
    }
}

impl SceneSource for FixtureScene {
    fn parts(&self) -> Vec<PartRecord> {
        self.parts.clone()
    }

    fn assembly_bounds(&self) -> Option<Aabb> {
        Aabb::union_all(self.parts.iter().map(|p| &p.world_bounds))
    }
}

impl PartSink for FixtureScene {
    fn parent_world_to_local(&self, part: PartId) -> Option<Mat4> {
        match self.parents.get(&part) {
            Some(parent) => parent.inverse(),
            None => Some(Mat4::identity()),
        }
    }

    fn set_local_position(&mut self, part: PartId, local: Vec3) {
        self.locals.insert(part, local);
    }
}

/// Counts writes without storing them.
#[derive(Default)]
pub struct CountingSink {
    pub writes: BTreeMap<PartId, usize>,
}

impl PartSink for CountingSink {
    fn parent_world_to_local(&self, _part: PartId) -> Option<Mat4> {
        Some(Mat4::identity())
    }

    fn set_local_position(&mut self, part: PartId, _local: Vec3) {
        *self.writes.entry(part).or_default() += 1;
    }
}

pub fn approx_eq(a: f32, b: f32) {
    let diff = (a - b).abs();
    assert!(diff <= 1e-4, "expected {b}, got {a} (diff {diff})");
}

pub fn approx_eq3(a: Vec3, b: Vec3) {
    for (x, y) in a.to_array().into_iter().zip(b.to_array()) {
        approx_eq(x, y);
    }
}

/// The 2×2 cube scenario: a thin plate named `bottom` centered at the origin
/// (top face at y = 0.05) with four unit cubes resting on it.
pub fn cubes_on_plate() -> (FixtureScene, Vec<PartId>) {
    let mut scene = FixtureScene::new();
    scene.add_box("bottom", Vec3::ZERO, Vec3::new(1.0, 0.05, 1.0));
    let cubes = [(-0.5, -0.5), (0.5, -0.5), (-0.5, 0.5), (0.5, 0.5)]
        .into_iter()
        .enumerate()
        .map(|(i, (x, z))| {
            scene.add_box(&format!("cube-{i}"), Vec3::new(x, 0.55, z), Vec3::splat(0.5))
        })
        .collect();
    (scene, cubes)
}
