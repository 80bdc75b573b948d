// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use crate::math::{Mat4, Vec3};
use crate::types::aabb::Aabb;

/// Oriented plane `normal · p + constant = 0`.
///
/// Invariant: `normal` is unit length, so [`Plane::signed_distance`] returns
/// metric distances (positive on the side the normal points to).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Plane {
    normal: Vec3,
    constant: f32,
}

impl Plane {
    /// Plane through `point` with the given `normal`.
    ///
    /// The normal is normalised; a degenerate normal falls back to +Y.
    #[must_use]
    pub fn from_normal_and_point(normal: Vec3, point: Vec3) -> Self {
        let normal = normal.normalize_or(Vec3::UNIT_Y);
        Self {
            normal,
            constant: -normal.dot(&point),
        }
    }

    /// Builds the reference plane for a thin anchor part.
    ///
    /// - `local_bounds`: the anchor's geometry bounds in its own space.
    /// - `world`: the anchor's local-to-world matrix.
    /// - `world_bounds`: world box of the anchor and its descendants.
    /// - `offset`: signed shift of the plane along its normal.
    ///
    /// The local axis of minimum extent (ties resolved x, then y, then z) is
    /// mapped to world space with the normal matrix and normalised. The plane
    /// passes through the center of `world_bounds` shifted by `offset`.
    ///
    /// Degenerate inputs do not fail: a singular `world` maps the axis with
    /// its linear part instead, and a collapsed axis falls back to +Y.
    #[must_use]
    pub fn from_anchor(
        local_bounds: &Aabb,
        world: &Mat4,
        world_bounds: &Aabb,
        offset: f32,
    ) -> Self {
        let axis = match min_extent_axis(local_bounds) {
            0 => Vec3::UNIT_X,
            1 => Vec3::UNIT_Y,
            _ => Vec3::UNIT_Z,
        };
        let mapped = match world.normal_matrix() {
            Some(nm) => nm.transform_direction(&axis),
            None => world.transform_direction(&axis),
        };
        let normal = mapped.normalize_or(Vec3::UNIT_Y);
        let center = world_bounds.center();
        let point = center.add(&normal.scale(offset));
        Self::from_normal_and_point(normal, point).normalized()
    }

    /// Unit normal.
    #[must_use]
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Plane constant (`-normal · p` for any point `p` on the plane).
    #[must_use]
    pub fn constant(&self) -> f32 {
        self.constant
    }

    /// Rescales normal and constant so the normal has unit length.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let len = self.normal.length();
        if len <= crate::math::EPSILON || !len.is_finite() {
            return Self {
                normal: Vec3::UNIT_Y,
                constant: self.constant,
            };
        }
        let inv = 1.0 / len;
        Self {
            normal: self.normal.scale(inv),
            constant: self.constant * inv,
        }
    }

    /// Signed distance from `point` to the plane; positive on the normal side.
    #[must_use]
    pub fn signed_distance(&self, point: &Vec3) -> f32 {
        self.normal.dot(point) + self.constant
    }

    /// Minimum and maximum signed distance over the eight corners of `aabb`.
    #[must_use]
    pub fn distance_range(&self, aabb: &Aabb) -> (f32, f32) {
        aabb.corners()
            .iter()
            .map(|c| self.signed_distance(c))
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), d| {
                (lo.min(d), hi.max(d))
            })
    }
}

/// Index (0 = x, 1 = y, 2 = z) of the axis along which `aabb` is thinnest.
/// Ties go to the earlier axis.
#[must_use]
pub fn min_extent_axis(aabb: &Aabb) -> usize {
    let [sx, sy, sz] = aabb.size().to_array();
    if sx <= sy && sx <= sz {
        0
    } else if sy <= sx && sy <= sz {
        1
    } else {
        2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thinnest_axis_prefers_earlier_on_ties() {
        let cube = Aabb::new(Vec3::ZERO, Vec3::splat(1.0));
        assert_eq!(min_extent_axis(&cube), 0);
        let slab = Aabb::new(Vec3::ZERO, Vec3::new(2.0, 1.0, 1.0));
        assert_eq!(min_extent_axis(&slab), 1);
        let plate = Aabb::new(Vec3::ZERO, Vec3::new(2.0, 2.0, 0.1));
        assert_eq!(min_extent_axis(&plate), 2);
    }

    #[test]
    fn degenerate_normal_falls_back_to_up() {
        let p = Plane::from_normal_and_point(Vec3::ZERO, Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(p.normal(), Vec3::UNIT_Y);
        assert_eq!(p.signed_distance(&Vec3::new(5.0, 3.0, -1.0)), 1.0);
    }
}
