// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Explosion factor state: a target set by input and a current value that
//! chases it.

use strata_geom::math::clamp;

/// Current and target explosion factor, both kept in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ExplosionState {
    current: f32,
    target: f32,
}

impl ExplosionState {
    /// Assembled state `(0, 0)`.
    pub const fn new() -> Self {
        Self {
            current: 0.0,
            target: 0.0,
        }
    }

    /// Smoothed factor used for displacement.
    pub fn current(&self) -> f32 {
        self.current
    }

    /// Value `current` is moving toward.
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Stores `clamp(f, 0, 1)` as the target; with `snap`, also jumps
    /// `current` there so no transition plays.
    ///
    /// Last call wins; repeated calls with the same value are no-ops.
    pub fn set_target(&mut self, f: f32, snap: bool) {
        self.target = clamp(f, 0.0, 1.0);
        if snap {
            self.current = self.target;
        }
    }

    /// Moves `current` toward `target` by the fraction
    /// `min(1, rate · dt)` of the remaining gap.
    ///
    /// The clamp keeps a long frame (e.g. after a stall) from overshooting.
    /// Non-positive or non-finite `dt` leaves the state untouched.
    pub fn advance(&mut self, dt: f32, rate: f32) {
        if !(dt.is_finite() && dt > 0.0) {
            return;
        }
        let k = (rate * dt).min(1.0);
        self.current += (self.target - self.current) * k;
    }
}
