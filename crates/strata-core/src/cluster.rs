// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Layer adjacency graph and rigid-cluster extraction.
//!
//! Two parts are joined by an edge when they sit in the same depth layer
//! relative to the reference plane *and* their boxes are within a small gap
//! of each other. Layer alone would merge coplanar parts on opposite sides of
//! the model; proximity alone would merge parts stacked on top of each other.
//! Each connected component of the graph moves as one rigid cluster.
//!
//! Output order is deterministic: clusters are sorted by their lowest member
//! index and members keep traversal order from that seed.

use strata_geom::{Aabb, Plane};

/// Adjacency lists indexed like the input part slice.
pub type Adjacency = Vec<Vec<usize>>;

/// Pair-test tolerances for [`layer_graph`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerTolerances {
    /// Max difference of center depths for two parts to share a layer.
    pub same_layer: f32,
    /// Gap by which one box is inflated before the intersection test.
    pub near_gap: f32,
}

/// Builds the same-layer-and-near graph over `boxes` (world bounds).
///
/// All `N·(N-1)/2` pairs are tested; N is the part count of one assembly.
pub fn layer_graph(plane: &Plane, boxes: &[Aabb], tol: LayerTolerances) -> Adjacency {
    let depths: Vec<f32> = boxes
        .iter()
        .map(|b| plane.signed_distance(&b.center()))
        .collect();

    let mut adj: Adjacency = vec![Vec::new(); boxes.len()];
    for i in 0..boxes.len() {
        for j in (i + 1)..boxes.len() {
            let same_layer = (depths[i] - depths[j]).abs() <= tol.same_layer;
            if same_layer && boxes[i].is_near(&boxes[j], tol.near_gap) {
                adj[i].push(j);
                adj[j].push(i);
            }
        }
    }
    adj
}

/// Connected components of `adj` via iterative depth-first traversal.
///
/// Every vertex lands in exactly one component; isolated vertices form
/// singletons.
pub fn connected_components(adj: &Adjacency) -> Vec<Vec<usize>> {
    let mut seen = vec![false; adj.len()];
    let mut components = Vec::new();
    for seed in 0..adj.len() {
        if seen[seed] {
            continue;
        }
        seen[seed] = true;
        let mut stack = vec![seed];
        let mut component = Vec::new();
        while let Some(u) = stack.pop() {
            component.push(u);
            for &v in &adj[u] {
                if !seen[v] {
                    seen[v] = true;
                    stack.push(v);
                }
            }
        }
        component.sort_unstable();
        components.push(component);
    }
    components
}

/// Partitions `boxes` into rigid clusters of indices.
pub fn cluster_boxes(plane: &Plane, boxes: &[Aabb], tol: LayerTolerances) -> Vec<Vec<usize>> {
    connected_components(&layer_graph(plane, boxes, tol))
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_geom::Vec3;

    const TOL: LayerTolerances = LayerTolerances {
        same_layer: 0.0007,
        near_gap: 0.015,
    };

    fn up_plane() -> Plane {
        Plane::from_normal_and_point(Vec3::UNIT_Y, Vec3::ZERO)
    }

    fn unit_cube(x: f32, y: f32, z: f32) -> Aabb {
        Aabb::new(Vec3::new(x, y, z), Vec3::new(x + 1.0, y + 1.0, z + 1.0))
    }

    #[test]
    fn empty_input_yields_no_clusters() {
        assert!(cluster_boxes(&up_plane(), &[], TOL).is_empty());
    }

    #[test]
    fn chain_of_touching_boxes_is_one_cluster() {
        let boxes = [
            unit_cube(0.0, 0.0, 0.0),
            unit_cube(5.0, 0.0, 0.0),
            unit_cube(1.0, 0.0, 0.0),
            unit_cube(2.0, 0.0, 0.0),
            unit_cube(3.0, 0.0, 0.0),
            unit_cube(4.0, 0.0, 0.0),
        ];
        let clusters = cluster_boxes(&up_plane(), &boxes, TOL);
        assert_eq!(clusters.len(), 1);
        let mut members = clusters[0].clone();
        members.sort_unstable();
        assert_eq!(members, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn coplanar_but_distant_boxes_stay_apart() {
        let boxes = [unit_cube(0.0, 0.0, 0.0), unit_cube(10.0, 0.0, 0.0)];
        let clusters = cluster_boxes(&up_plane(), &boxes, TOL);
        assert_eq!(clusters, vec![vec![0], vec![1]]);
    }

    #[test]
    fn stacked_boxes_fail_the_layer_test() {
        let boxes = [unit_cube(0.0, 0.0, 0.0), unit_cube(0.0, 1.0, 0.0)];
        let adj = layer_graph(&up_plane(), &boxes, TOL);
        assert!(adj.iter().all(Vec::is_empty));
        assert_eq!(connected_components(&adj).len(), 2);
    }

    #[test]
    fn components_are_ordered_by_lowest_member() {
        // 0 and 2 touch; 1 is isolated.
        let boxes = [
            unit_cube(0.0, 0.0, 0.0),
            unit_cube(9.0, 0.0, 0.0),
            unit_cube(1.0, 0.0, 0.0),
        ];
        let clusters = cluster_boxes(&up_plane(), &boxes, TOL);
        assert_eq!(clusters, vec![vec![0, 2], vec![1]]);
    }
}
