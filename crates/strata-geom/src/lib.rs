// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![doc = r"Geometry primitives for Strata.

This crate provides:
- Float32 linear algebra (`Vec3`, `Mat4`, `Quat`) with affine inverse and
  normal-matrix helpers.
- Axis-aligned bounding boxes (`Aabb`) with corner enumeration and the
  gap-inflated proximity test used for adjacency.
- Rigid transforms with non-uniform scale (`Transform`).
- Reference planes (`Plane`) with signed distances and construction from a
  thin anchor volume.

Design notes:
- Float32 throughout; operations favor clarity and reproducibility.
- Degenerate inputs (zero-length vectors, singular matrices) resolve to
  documented fallbacks instead of NaN.
- Rustdoc is treated as part of the contract; public items are documented.
"]

/// Vectors, matrices, quaternions and scalar helpers.
pub mod math;
/// Foundational geometric types.
pub mod types;

pub use math::{Mat4, Quat, Vec3};
pub use types::aabb::Aabb;
pub use types::plane::Plane;
pub use types::transform::Transform;
