// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use crate::math::{Mat4, Vec3};

/// Axis-aligned bounding box.
///
/// Invariants:
/// - `min` components are less than or equal to `max` components.
/// - Values are `f32` in whatever space the caller works in (local geometry
///   bounds or world bounds).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    min: Vec3,
    max: Vec3,
}

/// `a <= b` on every axis.
fn ordered(a: &Vec3, b: &Vec3) -> bool {
    a.x() <= b.x() && a.y() <= b.y() && a.z() <= b.z()
}

impl Aabb {
    /// Constructs an AABB from its minimum and maximum corners.
    ///
    /// # Panics
    /// Panics if any component of `min` is greater than its counterpart in `max`.
    /// Use [`Aabb::try_new`] for untrusted input.
    #[must_use]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        assert!(ordered(&min, &max), "invalid AABB: min > max");
        Self { min, max }
    }

    /// Constructs an AABB, returning `None` when `min > max` on any axis or a
    /// component is not finite.
    #[must_use]
    pub fn try_new(min: Vec3, max: Vec3) -> Option<Self> {
        (min.is_finite() && max.is_finite() && ordered(&min, &max)).then_some(Self { min, max })
    }

    /// Returns the minimum corner.
    #[must_use]
    pub fn min(&self) -> Vec3 {
        self.min
    }

    /// Returns the maximum corner.
    #[must_use]
    pub fn max(&self) -> Vec3 {
        self.max
    }

    /// Builds an AABB centered at `center` with half-extents `hx, hy, hz`.
    #[must_use]
    pub fn from_center_half_extents(center: Vec3, hx: f32, hy: f32, hz: f32) -> Self {
        let he = Vec3::new(hx.abs(), hy.abs(), hz.abs());
        Self {
            min: center.sub(&he),
            max: center.add(&he),
        }
    }

    /// Center point of the box.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        self.min.add(&self.max).scale(0.5)
    }

    /// Edge lengths along each axis.
    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max.sub(&self.min)
    }

    /// Length of the box diagonal (`|max - min|`).
    #[must_use]
    pub fn diagonal_length(&self) -> f32 {
        self.size().length()
    }

    /// Returns `true` if this AABB overlaps another (inclusive on faces).
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        ordered(&self.min, &other.max) && ordered(&other.min, &self.max)
    }

    /// Returns `true` if this box, inflated by `gap` on every side, still
    /// intersects `other`.
    ///
    /// Only `self` is inflated; because inflation is uniform the result is
    /// symmetric in practice.
    #[must_use]
    pub fn is_near(&self, other: &Self, gap: f32) -> bool {
        self.inflate(gap).overlaps(other)
    }

    /// Returns the union of two AABBs.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(&other.min),
            max: self.max.max(&other.max),
        }
    }

    /// Inflates the box by a uniform margin `m` in all directions.
    #[must_use]
    pub fn inflate(&self, m: f32) -> Self {
        let delta = Vec3::splat(m);
        Self {
            min: self.min.sub(&delta),
            max: self.max.add(&delta),
        }
    }

    /// The eight corners of the box, ordered by `(x, y, z)` bits with `min`
    /// before `max` on each axis.
    #[must_use]
    pub fn corners(&self) -> [Vec3; 8] {
        let [minx, miny, minz] = self.min.to_array();
        let [maxx, maxy, maxz] = self.max.to_array();
        [
            Vec3::new(minx, miny, minz),
            Vec3::new(minx, miny, maxz),
            Vec3::new(minx, maxy, minz),
            Vec3::new(minx, maxy, maxz),
            Vec3::new(maxx, miny, minz),
            Vec3::new(maxx, miny, maxz),
            Vec3::new(maxx, maxy, minz),
            Vec3::new(maxx, maxy, maxz),
        ]
    }

    /// Axis-aligned bounds of this box's eight corners mapped through `mat`.
    #[must_use]
    pub fn transformed(&self, mat: &Mat4) -> Self {
        let [first, rest @ ..] = self.corners().map(|c| mat.transform_point(&c));
        rest.iter().fold(Self { min: first, max: first }, |b, p| Self {
            min: b.min.min(p),
            max: b.max.max(p),
        })
    }

    /// Builds the minimal AABB that contains all `points`, or `None` when
    /// `points` is empty.
    #[must_use]
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let (min, max) = rest
            .iter()
            .fold((*first, *first), |(mi, ma), p| (mi.min(p), ma.max(p)));
        Some(Self { min, max })
    }

    /// Union of every box in `boxes`, or `None` when empty.
    #[must_use]
    pub fn union_all<'a, I>(boxes: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Self>,
    {
        boxes
            .into_iter()
            .fold(None, |acc: Option<Self>, b| match acc {
                Some(a) => Some(a.union(b)),
                None => Some(*b),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_new_rejects_inverted_and_non_finite() {
        assert!(Aabb::try_new(Vec3::splat(1.0), Vec3::ZERO).is_none());
        assert!(Aabb::try_new(Vec3::ZERO, Vec3::new(f32::NAN, 1.0, 1.0)).is_none());
        assert!(Aabb::try_new(Vec3::ZERO, Vec3::ZERO).is_some());
    }

    #[test]
    fn corners_cover_min_and_max() {
        let b = Aabb::new(Vec3::new(-1.0, 0.0, 2.0), Vec3::new(1.0, 3.0, 4.0));
        let c = b.corners();
        assert_eq!(c[0], b.min());
        assert_eq!(c[7], b.max());
        assert_eq!(Aabb::from_points(&c), Some(b));
    }

    #[test]
    fn union_all_of_empty_is_none() {
        assert_eq!(Aabb::union_all(&[]), None);
    }
}
