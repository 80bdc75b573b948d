// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use crate::math::{Mat4, Quat, Vec3};

/// Local transform of a scene node: scale, then rotate, then translate.
///
/// Scale may be non-uniform (and zero, which makes the node's matrix
/// singular; consumers fall back rather than fail).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    translation: Vec3,
    rotation: Quat,
    scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// No translation, no rotation, unit scale.
    pub const fn identity() -> Self {
        Self::from_translation(Vec3::ZERO)
    }

    /// Creates a transform from components.
    pub const fn new(translation: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }

    /// Pure translation.
    pub const fn from_translation(translation: Vec3) -> Self {
        Self::new(translation, Quat::identity(), Vec3::splat(1.0))
    }

    /// Position in the parent's space.
    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    /// Moves the node, keeping rotation and scale.
    pub fn set_translation(&mut self, translation: Vec3) {
        self.translation = translation;
    }

    /// Rotation as stored (not necessarily normalised).
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Per-axis scale.
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Column-major `T · R · S`.
    pub fn to_mat4(&self) -> Mat4 {
        let axes = [Vec3::UNIT_X, Vec3::UNIT_Y, Vec3::UNIT_Z];
        let s = self.scale.to_array();
        let mut data = [0.0; 16];
        for (col, (axis, factor)) in axes.iter().zip(s).enumerate() {
            let c = self.rotation.rotate(axis).scale(factor);
            data[col * 4..col * 4 + 3].copy_from_slice(&c.to_array());
        }
        data[12..15].copy_from_slice(&self.translation.to_array());
        data[15] = 1.0;
        Mat4::new(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrix_applies_scale_before_translation() {
        let t = Transform::new(Vec3::new(1.0, 2.0, 3.0), Quat::identity(), Vec3::new(2.0, 3.0, 4.0));
        let p = t.to_mat4().transform_point(&Vec3::splat(1.0));
        assert_eq!(p.to_array(), [3.0, 5.0, 7.0]);
    }

    #[test]
    fn identity_matrix_round_trip() {
        assert_eq!(Transform::identity().to_mat4(), Mat4::identity());
    }
}
