// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The explosion engine: an owned context tying configuration, the prepared
//! assembly and the explosion state together.
//!
//! Lifecycle per assembly:
//! 1. [`Exploder::prepare`] reads the scene once, clusters parts and derives
//!    travel laws. The result replaces the previous assembly atomically.
//! 2. Input calls ([`Exploder::adjust_target`], [`Exploder::wheel`], ...)
//!    move the target.
//! 3. Each frame the driver calls [`Exploder::advance`] then
//!    [`Exploder::apply`] (or [`Exploder::frame`]) with an explicit `dt`.

use std::collections::BTreeMap;

use strata_geom::{Plane, Vec3};
use tracing::{debug, info, instrument, warn};

use crate::cluster::{cluster_boxes, LayerTolerances};
use crate::config::{ConfigError, ExplodeConfig, ExplodeMode};
use crate::controller::ExplosionState;
use crate::error::ExplodeError;
use crate::scene::{PartId, PartRecord, PartSink, SceneSource};
use crate::travel::{plane_groups, radial_groups, Member, MotionGroup};

/// Geometry derived once per assembly; immutable while animating.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedAssembly {
    plane: Option<Plane>,
    groups: Vec<MotionGroup>,
    /// `(group index, member)` in the source's traversal order, so a part is
    /// always written after its ancestors.
    writes: Vec<(usize, Member)>,
    diagonal: f32,
}

impl PreparedAssembly {
    fn new(
        plane: Option<Plane>,
        groups: Vec<MotionGroup>,
        parts: &[PartRecord],
        diagonal: f32,
    ) -> Self {
        let rank: BTreeMap<PartId, usize> =
            parts.iter().enumerate().map(|(i, p)| (p.id, i)).collect();
        let mut writes: Vec<(usize, Member)> = groups
            .iter()
            .enumerate()
            .flat_map(|(g, group)| group.members().iter().map(move |m| (g, *m)))
            .collect();
        writes.sort_by_key(|(_, m)| rank.get(&m.part).copied().unwrap_or(usize::MAX));
        Self {
            plane,
            groups,
            writes,
            diagonal,
        }
    }

    /// Reference plane (plane mode only).
    pub fn plane(&self) -> Option<&Plane> {
        self.plane.as_ref()
    }

    /// Groups that animate.
    pub fn groups(&self) -> &[MotionGroup] {
        &self.groups
    }

    /// Length of the assembly's world-bounds diagonal.
    pub fn diagonal(&self) -> f32 {
        self.diagonal
    }
}

/// Summary of one preparation pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrepareReport {
    /// Parts reported by the scene (anchor and skinned parts included).
    pub parts: usize,
    /// Rigid parts considered for motion.
    pub movable: usize,
    /// Clusters formed (one per movable part in radial mode).
    pub clusters: usize,
    /// Groups that animate.
    pub active: usize,
    /// Clusters left assembled by the near-band filter.
    pub dropped: usize,
    /// Assembly diagonal length.
    pub diagonal: f32,
}

/// Exploded-view engine for one assembly at a time.
#[derive(Debug, Clone)]
pub struct Exploder {
    config: ExplodeConfig,
    state: ExplosionState,
    assembly: Option<PreparedAssembly>,
}

impl Exploder {
    /// Creates an inert engine after validating `config`.
    pub fn new(config: ExplodeConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            config: config.validated()?,
            state: ExplosionState::new(),
            assembly: None,
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &ExplodeConfig {
        &self.config
    }

    /// Explosion state.
    pub fn state(&self) -> ExplosionState {
        self.state
    }

    /// The prepared assembly, if any.
    pub fn assembly(&self) -> Option<&PreparedAssembly> {
        self.assembly.as_ref()
    }

    /// Groups that animate (empty when nothing is prepared).
    pub fn groups(&self) -> &[MotionGroup] {
        match &self.assembly {
            Some(assembly) => assembly.groups(),
            None => &[],
        }
    }

    /// `true` when a frame would write nothing.
    pub fn is_inert(&self) -> bool {
        self.groups().is_empty()
    }

    /// Reads `source` and replaces the current assembly.
    ///
    /// The new assembly is built completely before it is swapped in; on error
    /// the previous assembly and explosion state are left untouched. On
    /// success the explosion state snaps to `(0, 0)`.
    #[instrument(skip_all)]
    pub fn prepare<S>(&mut self, source: &S) -> Result<PrepareReport, ExplodeError>
    where
        S: SceneSource + ?Sized,
    {
        let parts = source.parts();
        let bounds = source.assembly_bounds();
        let diagonal = bounds.map_or(0.0, |b| b.diagonal_length());
        if bounds.is_none() {
            warn!("assembly has no geometry bounds; travel distances collapse to zero");
        }

        let (assembly, report) = match &self.config.mode {
            ExplodeMode::Plane { anchor } => {
                let Some(anchor_part) = parts.iter().find(|p| &p.name == anchor) else {
                    return Err(if source.contains_name(anchor) {
                        ExplodeError::AnchorWithoutGeometry(anchor.clone())
                    } else {
                        ExplodeError::AnchorNotFound(anchor.clone())
                    });
                };
                let plane = Plane::from_anchor(
                    &anchor_part.local_bounds,
                    &anchor_part.world_matrix,
                    &anchor_part.world_bounds,
                    self.config.plane_offset,
                );
                debug!(normal = ?plane.normal().to_array(), "reference plane");

                let movable: Vec<&PartRecord> = parts
                    .iter()
                    .filter(|p| p.is_rigid() && p.id != anchor_part.id)
                    .collect();
                let boxes: Vec<_> = movable.iter().map(|p| p.world_bounds).collect();
                let clusters = cluster_boxes(
                    &plane,
                    &boxes,
                    LayerTolerances {
                        same_layer: self.config.same_layer_tolerance,
                        near_gap: self.config.near_gap_for_adjacency,
                    },
                );
                let travel = plane_groups(&plane, &movable, &clusters, diagonal, &self.config);
                let report = PrepareReport {
                    parts: parts.len(),
                    movable: movable.len(),
                    clusters: clusters.len(),
                    active: travel.groups.len(),
                    dropped: travel.dropped,
                    diagonal,
                };
                let assembly = PreparedAssembly::new(Some(plane), travel.groups, &parts, diagonal);
                (assembly, report)
            }
            ExplodeMode::Radial => {
                let center = bounds.map_or(Vec3::ZERO, |b| b.center());
                let movable: Vec<&PartRecord> = parts.iter().filter(|p| p.is_rigid()).collect();
                let groups = radial_groups(movable.iter().copied(), center, diagonal, &self.config);
                let report = PrepareReport {
                    parts: parts.len(),
                    movable: movable.len(),
                    clusters: groups.len(),
                    active: groups.len(),
                    dropped: 0,
                    diagonal,
                };
                let assembly = PreparedAssembly::new(None, groups, &parts, diagonal);
                (assembly, report)
            }
        };

        let skipped = parts.iter().filter(|p| !p.is_rigid()).count();
        if skipped > 0 {
            debug!(skipped, "non-rigid parts excluded");
        }
        info!(
            parts = report.parts,
            clusters = report.clusters,
            active = report.active,
            dropped = report.dropped,
            diagonal = report.diagonal,
            "assembly prepared"
        );

        self.assembly = Some(assembly);
        self.state = ExplosionState::new();
        Ok(report)
    }

    /// Discards the prepared assembly and resets the explosion state.
    pub fn clear(&mut self) {
        self.assembly = None;
        self.state = ExplosionState::new();
    }

    /// Sets the target to `clamp(f, 0, 1)`; with `snap`, also the current value.
    pub fn set_target(&mut self, f: f32, snap: bool) {
        self.state.set_target(f, snap);
    }

    /// Sets the target to `value` (clamped).
    pub fn set_target_absolute(&mut self, value: f32) {
        self.state.set_target(value, false);
    }

    /// Moves the target by `delta` (result clamped).
    pub fn adjust_target(&mut self, delta: f32) {
        self.state.set_target(self.state.target() + delta, false);
    }

    /// Maps a wheel event to one step: scrolling up (`delta_y < 0`) explodes,
    /// scrolling down collapses. Zero or NaN deltas are ignored.
    pub fn wheel(&mut self, delta_y: f32) {
        let step = self.config.wheel_step_size;
        if delta_y < 0.0 {
            self.adjust_target(step);
        } else if delta_y > 0.0 {
            self.adjust_target(-step);
        }
    }

    /// Discrete trigger: targets fully exploded when below halfway, otherwise
    /// fully assembled.
    pub fn toggle(&mut self) {
        let next = if self.state.target() < 0.5 { 1.0 } else { 0.0 };
        self.set_target_absolute(next);
    }

    /// Advances the smoothed factor by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.state.advance(dt, self.config.smoothing_rate);
    }

    /// Writes every animated part's local position for the current factor.
    ///
    /// Each member goes to `original + direction · magnitude(current)`,
    /// converted through its parent's current world-to-local matrix. Parts
    /// are written in traversal order across all groups, so a moved ancestor
    /// is already in place when its descendants are converted. Calling this
    /// repeatedly without changing the state writes identical values.
    pub fn apply<S>(&self, sink: &mut S)
    where
        S: PartSink + ?Sized,
    {
        let Some(assembly) = &self.assembly else {
            return;
        };
        let explosion = self.state.current();
        let deltas: Vec<Vec3> = assembly.groups.iter().map(|g| g.displacement(explosion)).collect();
        for (group, member) in &assembly.writes {
            let Some(to_local) = sink.parent_world_to_local(member.part) else {
                warn!(part = %member.part, "no invertible parent transform; part not moved");
                continue;
            };
            let world = member.original_world.add(&deltas[*group]);
            sink.set_local_position(member.part, to_local.transform_point(&world));
        }
    }

    /// One frame: [`Exploder::advance`] then [`Exploder::apply`]. Writes
    /// nothing when the engine is inert.
    pub fn frame<S>(&mut self, dt: f32, sink: &mut S)
    where
        S: PartSink + ?Sized,
    {
        self.advance(dt);
        if !self.is_inert() {
            self.apply(sink);
        }
    }
}
