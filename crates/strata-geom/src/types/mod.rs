// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Core geometry types used by the engine (AABB, transform, plane).
//!
//! Notes:
//! - Overlap semantics are inclusive on faces: two parts that merely touch
//!   count as adjacent.
//! - Box corners are enumerated explicitly so that plane distances measure
//!   the true extent of tilted boxes rather than the center alone.

#[doc = "Axis-aligned bounding boxes."]
pub mod aabb;
#[doc = "Reference planes and signed distances."]
pub mod plane;
#[doc = "Rigid transforms with non-uniform scale."]
pub mod transform;
