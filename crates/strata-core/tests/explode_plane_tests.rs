// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
#![allow(clippy::unwrap_used, clippy::panic)]
//! Plane-variant behaviour of the explosion engine, end to end.

mod common;

use common::{approx_eq, approx_eq3, cubes_on_plate, CountingSink, FixtureScene};
use strata_core::{ExplodeConfig, ExplodeError, Exploder, PartKind};
use strata_geom::{Mat4, Vec3};

fn flush_plane_config() -> ExplodeConfig {
    ExplodeConfig {
        plane_offset: 0.0,
        ..ExplodeConfig::plane("bottom")
    }
}

fn engine() -> Exploder {
    match Exploder::new(flush_plane_config()) {
        Ok(e) => e,
        Err(err) => panic!("default config must validate: {err}"),
    }
}

#[test]
fn four_touching_cubes_form_one_cluster_and_move_together() {
    let (mut scene, cubes) = cubes_on_plate();
    let originals: Vec<Vec3> = cubes.iter().filter_map(|id| scene.local(*id)).collect();
    let mut engine = engine();
    let report = engine.prepare(&scene).unwrap();
    assert_eq!(report.parts, 5);
    assert_eq!(report.movable, 4);
    assert_eq!(report.clusters, 1);
    assert_eq!(report.active, 1);

    let diag = (4.0f32 + 1.1 * 1.1 + 4.0).sqrt();
    approx_eq(report.diagonal, diag);

    // Assembled: nothing moves.
    engine.apply(&mut scene);
    for (id, orig) in cubes.iter().zip(&originals) {
        approx_eq3(scene.local(*id).unwrap(), *orig);
    }

    // Fully exploded: basePush + full depth travel = 0.42 of the diagonal.
    engine.set_target(1.0, true);
    engine.apply(&mut scene);
    let full = 0.42 * diag;
    for (id, orig) in cubes.iter().zip(&originals) {
        approx_eq3(scene.local(*id).unwrap(), orig.add(&Vec3::new(0.0, full, 0.0)));
    }

    // Halfway: strictly between, and linear in the factor.
    engine.set_target(0.5, true);
    engine.apply(&mut scene);
    for (id, orig) in cubes.iter().zip(&originals) {
        let dy = scene.local(*id).unwrap().y() - orig.y();
        assert!(dy > 0.0 && dy < full);
        approx_eq(dy, 0.5 * full);
    }
}

#[test]
fn stacked_cubes_are_separate_clusters_and_keep_their_order() {
    let mut scene = FixtureScene::new();
    scene.add_box("bottom", Vec3::ZERO, Vec3::new(1.0, 0.05, 1.0));
    let lower = scene.add_box("lower", Vec3::new(0.0, 0.55, 0.0), Vec3::splat(0.5));
    let upper = scene.add_box("upper", Vec3::new(0.0, 1.55, 0.0), Vec3::splat(0.5));

    let mut engine = engine();
    let report = engine.prepare(&scene).unwrap();
    assert_eq!(report.clusters, 2);
    assert_eq!(report.active, 2);

    for t in [0.25, 0.5, 1.0] {
        engine.set_target(t, true);
        engine.apply(&mut scene);
        let lower_y = scene.local(lower).unwrap().y();
        let upper_y = scene.local(upper).unwrap().y();
        assert!(lower_y > 0.55);
        assert!(upper_y - 1.55 > lower_y - 0.55, "layers crossed at t={t}");
        assert!(upper_y > lower_y);
    }
}

#[test]
fn part_flush_with_plane_never_moves() {
    let (mut scene, _) = cubes_on_plate();
    let flush = scene.add_box("shim", Vec3::new(5.0, 0.0, 0.0), Vec3::new(0.3, 0.0005, 0.3));

    let mut engine = engine();
    let report = engine.prepare(&scene).unwrap();
    assert_eq!(report.clusters, 2);
    assert_eq!(report.dropped, 1);
    assert_eq!(report.active, 1);

    let mut sink = CountingSink::default();
    for t in [0.0, 0.3, 1.0] {
        engine.set_target(t, true);
        engine.apply(&mut sink);
    }
    assert!(!sink.writes.contains_key(&flush));
    assert!(engine
        .groups()
        .iter()
        .all(|g| g.members().iter().all(|m| m.part != flush)));
}

#[test]
fn anchor_is_never_written() {
    let (scene, _) = cubes_on_plate();
    let mut engine = engine();
    engine.prepare(&scene).unwrap();
    engine.set_target(1.0, true);
    let mut sink = CountingSink::default();
    engine.apply(&mut sink);
    assert_eq!(sink.writes.len(), 4);
    assert!(!sink.writes.contains_key(&strata_core::PartId(0)));
}

#[test]
fn apply_is_idempotent() {
    let (mut scene, _) = cubes_on_plate();
    let mut engine = engine();
    engine.prepare(&scene).unwrap();
    engine.set_target(0.8, false);
    engine.advance(0.05);
    engine.apply(&mut scene);
    let first = scene.locals.clone();
    engine.apply(&mut scene);
    assert_eq!(first, scene.locals);
}

#[test]
fn missing_anchor_leaves_previous_assembly_untouched() {
    let (scene, _) = cubes_on_plate();
    let mut engine = engine();
    engine.prepare(&scene).unwrap();
    engine.set_target(0.7, true);
    let before = engine.assembly().cloned();
    let state = engine.state();

    let mut other = FixtureScene::new();
    other.add_box("lid", Vec3::ZERO, Vec3::splat(1.0));
    let err = engine.prepare(&other).unwrap_err();
    assert_eq!(err, ExplodeError::AnchorNotFound("bottom".into()));
    assert_eq!(engine.assembly().cloned(), before);
    assert_eq!(engine.state(), state);
}

#[test]
fn prepare_resets_explosion_state() {
    let (scene, _) = cubes_on_plate();
    let mut engine = engine();
    engine.prepare(&scene).unwrap();
    engine.set_target(0.9, true);
    engine.prepare(&scene).unwrap();
    assert_eq!(engine.state().current(), 0.0);
    assert_eq!(engine.state().target(), 0.0);
}

#[test]
fn skinned_parts_are_excluded_from_clustering() {
    let (scene, cubes) = cubes_on_plate();
    let mut scene = scene;
    scene.set_kind(cubes[0], PartKind::Skinned);
    let mut engine = engine();
    let report = engine.prepare(&scene).unwrap();
    assert_eq!(report.movable, 3);
    engine.set_target(1.0, true);
    let mut sink = CountingSink::default();
    engine.apply(&mut sink);
    assert!(!sink.writes.contains_key(&cubes[0]));
    assert_eq!(sink.writes.len(), 3);
}

#[test]
fn displacement_is_converted_into_parent_space() {
    let mut scene = FixtureScene::new();
    scene.add_box("bottom", Vec3::ZERO, Vec3::new(1.0, 0.05, 1.0));
    let parent = Mat4::translation(0.0, 0.0, 5.0).multiply(&Mat4::scale(2.0, 2.0, 2.0));
    let child = scene.add_child_box("bracket", parent, Vec3::new(0.0, 0.3, 0.0), Vec3::splat(0.25));

    let mut engine = engine();
    engine.prepare(&scene).unwrap();
    engine.set_target(1.0, true);
    engine.apply(&mut scene);

    let group = engine
        .groups()
        .iter()
        .find(|g| g.members().iter().any(|m| m.part == child))
        .unwrap();
    approx_eq3(group.members()[0].original_world, Vec3::new(0.0, 0.6, 5.0));
    let mag = group.law().magnitude(1.0);
    // Parent scale halves the local offset.
    approx_eq3(scene.local(child).unwrap(), Vec3::new(0.0, 0.3 + mag / 2.0, 0.0));
}

#[test]
fn empty_scene_is_inert() {
    let mut scene = FixtureScene::new();
    scene.add_box("bottom", Vec3::ZERO, Vec3::new(1.0, 0.05, 1.0));
    let mut engine = engine();
    let report = engine.prepare(&scene).unwrap();
    assert_eq!(report.clusters, 0);
    assert!(engine.is_inert());
    engine.set_target_absolute(1.0);
    let mut sink = CountingSink::default();
    engine.frame(0.016, &mut sink);
    assert!(sink.writes.is_empty());
}
