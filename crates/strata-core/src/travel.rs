// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Travel model: how far and in which direction each motion group moves.
//!
//! Both variants reduce to the same shape, a [`MotionGroup`] with a unit
//! direction and a [`TravelLaw`]:
//!
//! - plane: one group per cluster, direction = plane normal,
//!   `magnitude(e) = basePush·e + depthScale·sAbs·e`;
//! - radial: one group per part, direction = center → part,
//!   `magnitude(e) = diagonal·radialFraction·e`.

use strata_geom::{Plane, Vec3};
use tracing::debug;

use crate::config::ExplodeConfig;
use crate::scene::{PartId, PartRecord};

/// Linear-in-explosion displacement law for one group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelLaw {
    /// Depth-independent push at full explosion.
    pub base_push: f32,
    /// Shared depth-to-travel factor.
    pub depth_scale: f32,
    /// Depth extent of the group (distance from the plane to its nearer face).
    pub s_abs: f32,
}

impl TravelLaw {
    /// A law that moves `distance` at full explosion, independent of depth.
    pub fn uniform(distance: f32) -> Self {
        Self {
            base_push: distance,
            depth_scale: 0.0,
            s_abs: 0.0,
        }
    }

    /// Displacement magnitude for explosion factor `explosion`.
    ///
    /// Non-decreasing in `explosion` because every coefficient is
    /// non-negative.
    pub fn magnitude(&self, explosion: f32) -> f32 {
        self.base_push * explosion + (self.depth_scale * self.s_abs) * explosion
    }
}

/// A part plus the world position it had when the assembly was prepared.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Member {
    /// Scene handle.
    pub part: PartId,
    /// World origin captured at preparation; never re-sampled.
    pub original_world: Vec3,
}

/// Parts that move together, with their shared direction and law.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionGroup {
    members: Vec<Member>,
    direction: Vec3,
    law: TravelLaw,
}

impl MotionGroup {
    /// Creates a group; `direction` is expected to be unit length.
    pub fn new(members: Vec<Member>, direction: Vec3, law: TravelLaw) -> Self {
        Self {
            members,
            direction,
            law,
        }
    }

    /// Member parts and their snapshots.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Unit travel direction.
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Travel law.
    pub fn law(&self) -> TravelLaw {
        self.law
    }

    /// World-space displacement at explosion factor `explosion`.
    pub fn displacement(&self, explosion: f32) -> Vec3 {
        self.direction.scale(self.law.magnitude(explosion))
    }
}

/// Result of the plane travel analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneTravel {
    /// Clusters that animate.
    pub groups: Vec<MotionGroup>,
    /// Clusters dropped by the near-band filter.
    pub dropped: usize,
    /// Largest depth extent over all clusters (before filtering).
    pub max_s: f32,
}

/// Depth extent of a cluster: distance from the plane to the nearer side of
/// the cluster's corner range, floored at `epsilon`.
pub fn depth_extent(plane: &Plane, parts: &[&PartRecord], epsilon: f32) -> f32 {
    let (lo, hi) = parts
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), part| {
            let (a, b) = plane.distance_range(&part.world_bounds);
            (lo.min(a), hi.max(b))
        });
    if !lo.is_finite() || !hi.is_finite() {
        return epsilon;
    }
    epsilon.max(lo.abs().min(hi.abs()))
}

/// Builds plane-variant motion groups from clusters of indices into `parts`.
///
/// `maxS` is taken over every cluster before near-band filtering, so dropping
/// flush clusters never inflates the travel of the rest.
pub fn plane_groups(
    plane: &Plane,
    parts: &[&PartRecord],
    clusters: &[Vec<usize>],
    diagonal: f32,
    config: &ExplodeConfig,
) -> PlaneTravel {
    let eps = config.epsilon_on_plane;
    let max_abs_travel = config.max_travel_fraction * diagonal;
    let base_push = config.base_push_fraction * diagonal;

    let drafts: Vec<(Vec<Member>, f32)> = clusters
        .iter()
        .map(|indices| {
            let records: Vec<&PartRecord> = indices.iter().map(|&i| parts[i]).collect();
            let members = records
                .iter()
                .map(|r| Member {
                    part: r.id,
                    original_world: r.world_origin(),
                })
                .collect();
            (members, depth_extent(plane, &records, eps))
        })
        .collect();

    let max_s = drafts.iter().fold(eps, |acc, (_, s)| acc.max(*s));
    let depth_scale = if max_s > 0.0 {
        max_abs_travel / max_s
    } else {
        0.0
    };

    let total = drafts.len();
    let groups: Vec<MotionGroup> = drafts
        .into_iter()
        .filter(|(_, s_abs)| *s_abs >= config.near_band_exclusion)
        .map(|(members, s_abs)| {
            let law = TravelLaw {
                base_push,
                depth_scale,
                s_abs,
            };
            debug!(
                members = members.len(),
                s_abs,
                full_travel = law.magnitude(1.0),
                "cluster"
            );
            MotionGroup::new(members, plane.normal(), law)
        })
        .collect();

    PlaneTravel {
        dropped: total - groups.len(),
        groups,
        max_s,
    }
}

/// Builds radial-variant motion groups: one per part, pointing away from
/// `center`. Parts sitting on the center move along +Y.
pub fn radial_groups<'a, I>(
    parts: I,
    center: Vec3,
    diagonal: f32,
    config: &ExplodeConfig,
) -> Vec<MotionGroup>
where
    I: IntoIterator<Item = &'a PartRecord>,
{
    let law = TravelLaw::uniform(diagonal * config.radial_fraction);
    parts
        .into_iter()
        .map(|part| {
            let direction = part.world_center().sub(&center).normalize_or(Vec3::UNIT_Y);
            let member = Member {
                part: part.id,
                original_world: part.world_origin(),
            };
            MotionGroup::new(vec![member], direction, law)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_law_ignores_depth() {
        let law = TravelLaw::uniform(2.0);
        assert_eq!(law.magnitude(0.0), 0.0);
        assert_eq!(law.magnitude(0.5), 1.0);
        assert_eq!(law.magnitude(1.0), 2.0);
    }

    #[test]
    fn depth_law_adds_base_push() {
        let law = TravelLaw {
            base_push: 0.1,
            depth_scale: 2.0,
            s_abs: 0.5,
        };
        assert!((law.magnitude(1.0) - 1.1).abs() < 1e-6);
        assert_eq!(law.magnitude(0.0), 0.0);
    }
}
