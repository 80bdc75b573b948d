// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Float32 math helpers covering scalar utilities and the linear algebra
//! primitives used by bounding volumes and planes.
//!
//! All operations round to `f32`.

mod mat4;
mod quat;
mod vec3;

pub use mat4::Mat4;
pub use quat::Quat;
pub use vec3::Vec3;

/// Global epsilon used by math routines when detecting degenerate values.
pub const EPSILON: f32 = 1e-6;

/// Clamps `value` to the inclusive `[min, max]` range.
///
/// NaN inputs collapse to `min` so callers always receive a value inside the
/// range.
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    debug_assert!(min <= max, "invalid clamp range: {min} > {max}");
    if value.is_nan() {
        return min;
    }
    value.max(min).min(max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_pins_out_of_range_and_nan() {
        assert_eq!(clamp(5.0, 0.0, 1.0), 1.0);
        assert_eq!(clamp(-3.0, 0.0, 1.0), 0.0);
        assert_eq!(clamp(0.25, 0.0, 1.0), 0.25);
        assert_eq!(clamp(f32::NAN, 0.0, 1.0), 0.0);
    }
}
