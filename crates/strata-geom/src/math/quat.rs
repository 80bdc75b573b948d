// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use crate::math::{Mat4, Vec3, EPSILON};

/// Rotation quaternion `(x, y, z, w)` as stored in scene descriptions.
///
/// Components are kept as given; [`Quat::to_mat4`] normalises first, so
/// drifted values from asset files still yield pure rotations.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Quat {
    x: f32,
    y: f32,
    z: f32,
    w: f32,
}

impl Quat {
    /// Creates a quaternion from raw components.
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// No rotation.
    pub const fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    /// Components as `[x, y, z, w]`.
    pub fn to_array(self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Rotation of `angle` radians about `axis`; identity for a zero axis.
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let axis = axis.normalize();
        if axis == Vec3::ZERO {
            return Self::identity();
        }
        let (s, c) = (angle * 0.5).sin_cos();
        Self::new(axis.x() * s, axis.y() * s, axis.z() * s, c)
    }

    /// Unit-length copy; identity when the norm is ~0 or not finite.
    pub fn normalize(&self) -> Self {
        let [x, y, z, w] = self.to_array();
        let norm = (x * x + y * y + z * z + w * w).sqrt();
        if !norm.is_finite() || norm <= EPSILON {
            return Self::identity();
        }
        Self::new(x / norm, y / norm, z / norm, w / norm)
    }

    /// Rotates `v` (normalising first).
    pub fn rotate(&self, v: &Vec3) -> Vec3 {
        let q = self.normalize();
        let u = Vec3::new(q.x, q.y, q.z);
        // v' = v + 2w(u × v) + 2u × (u × v)
        let t = u.cross(v).scale(2.0);
        v.add(&t.scale(q.w)).add(&u.cross(&t))
    }

    /// Rotation matrix (column-major 4×4).
    pub fn to_mat4(&self) -> Mat4 {
        let [c0, c1, c2] = [Vec3::UNIT_X, Vec3::UNIT_Y, Vec3::UNIT_Z].map(|axis| self.rotate(&axis));
        Mat4::new([
            c0.x(),
            c0.y(),
            c0.z(),
            0.0,
            c1.x(),
            c1.y(),
            c1.z(),
            0.0,
            c2.x(),
            c2.y(),
            c2.z(),
            0.0,
            0.0,
            0.0,
            0.0,
            1.0,
        ])
    }
}

impl From<[f32; 4]> for Quat {
    fn from([x, y, z, w]: [f32; 4]) -> Self {
        Self::new(x, y, z, w)
    }
}
