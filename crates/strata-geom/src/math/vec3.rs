// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use crate::math::EPSILON;

/// 3D vector used for points, directions and extents.
///
/// Whether a value is a point or a direction is up to the caller: use
/// [`crate::math::Mat4::transform_point`] for the former and
/// [`crate::math::Mat4::transform_direction`] for the latter.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vec3 {
    x: f32,
    y: f32,
    z: f32,
}

impl Vec3 {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    /// +X.
    pub const UNIT_X: Self = Self::new(1.0, 0.0, 0.0);
    /// +Y; also the fallback direction for degenerate normals.
    pub const UNIT_Y: Self = Self::new(0.0, 1.0, 0.0);
    /// +Z.
    pub const UNIT_Z: Self = Self::new(0.0, 0.0, 1.0);

    /// Creates a vector from components.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Vector with all three components set to `v`.
    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v)
    }

    /// Components as `[x, y, z]`.
    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// X component.
    pub fn x(&self) -> f32 {
        self.x
    }

    /// Y component.
    pub fn y(&self) -> f32 {
        self.y
    }

    /// Z component.
    pub fn z(&self) -> f32 {
        self.z
    }

    fn zip_with(&self, other: &Self, f: impl Fn(f32, f32) -> f32) -> Self {
        Self::new(f(self.x, other.x), f(self.y, other.y), f(self.z, other.z))
    }

    /// `self + other`.
    pub fn add(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a + b)
    }

    /// `self - other`.
    pub fn sub(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a - b)
    }

    /// `self * scalar`.
    pub fn scale(&self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }

    /// Component-wise minimum.
    pub fn min(&self, other: &Self) -> Self {
        self.zip_with(other, f32::min)
    }

    /// Component-wise maximum.
    pub fn max(&self, other: &Self) -> Self {
        self.zip_with(other, f32::max)
    }

    /// Dot product.
    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product.
    pub fn cross(&self, other: &Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Euclidean length.
    pub fn length(&self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction, or [`Vec3::ZERO`] when the length
    /// is at most `EPSILON` (callers test for zero and pick a fallback).
    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len <= EPSILON {
            return Self::ZERO;
        }
        self.scale(1.0 / len)
    }

    /// Like [`Vec3::normalize`], but returns `fallback` for degenerate or
    /// non-finite input.
    pub fn normalize_or(&self, fallback: Self) -> Self {
        let n = self.normalize();
        if n == Self::ZERO || !n.is_finite() {
            return fallback;
        }
        n
    }

    /// `true` when every component is finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Vec3> for [f32; 3] {
    fn from(value: Vec3) -> Self {
        value.to_array()
    }
}
