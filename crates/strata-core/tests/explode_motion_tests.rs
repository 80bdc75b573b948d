// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
#![allow(clippy::unwrap_used, clippy::panic)]
//! Smoothing, input mapping, radial variant and travel-law properties.

mod common;

use common::{approx_eq, approx_eq3, cubes_on_plate, FixtureScene};
use proptest::prelude::*;
use strata_core::{ExplodeConfig, Exploder, ExplosionState, TravelLaw};
use strata_geom::Vec3;

fn build(config: ExplodeConfig) -> Exploder {
    match Exploder::new(config) {
        Ok(e) => e,
        Err(err) => panic!("config must validate: {err}"),
    }
}

#[test]
fn invalid_config_fails_at_construction() {
    let cfg = ExplodeConfig {
        base_push_fraction: -1.0,
        ..ExplodeConfig::default()
    };
    assert!(Exploder::new(cfg).is_err());
}

#[test]
fn wheel_steps_and_clamps() {
    let mut engine = build(ExplodeConfig::default());
    engine.wheel(-120.0);
    approx_eq(engine.state().target(), 0.06);
    engine.wheel(-1.0);
    approx_eq(engine.state().target(), 0.12);
    engine.wheel(3.0);
    approx_eq(engine.state().target(), 0.06);
    engine.wheel(0.0);
    approx_eq(engine.state().target(), 0.06);
    for _ in 0..10 {
        engine.wheel(1.0);
    }
    assert_eq!(engine.state().target(), 0.0);
    // The wheel only moves the target; the current value follows on advance.
    assert_eq!(engine.state().current(), 0.0);
}

#[test]
fn adjust_and_absolute_targets_clamp() {
    let mut engine = build(ExplodeConfig::default());
    engine.set_target_absolute(5.0);
    assert_eq!(engine.state().target(), 1.0);
    engine.adjust_target(-3.0);
    assert_eq!(engine.state().target(), 0.0);
    engine.adjust_target(0.25);
    assert_eq!(engine.state().target(), 0.25);
}

#[test]
fn toggle_alternates_between_extremes() {
    let mut engine = build(ExplodeConfig::default());
    engine.toggle();
    assert_eq!(engine.state().target(), 1.0);
    engine.toggle();
    assert_eq!(engine.state().target(), 0.0);
}

#[test]
fn frames_ease_parts_toward_the_target() {
    let (mut scene, cubes) = cubes_on_plate();
    let start = scene.local(cubes[0]).unwrap();
    let mut engine = build(ExplodeConfig::plane("bottom"));
    engine.prepare(&scene).unwrap();
    engine.set_target_absolute(1.0);

    let mut last = start.y();
    for _ in 0..240 {
        engine.frame(1.0 / 60.0, &mut scene);
        let y = scene.local(cubes[0]).unwrap().y();
        assert!(y >= last);
        last = y;
    }
    let full = engine.groups()[0].law().magnitude(1.0);
    approx_eq(last - start.y(), full);
}

#[test]
fn radial_variant_moves_parts_away_from_center() {
    let mut scene = FixtureScene::new();
    let right = scene.add_box("right", Vec3::new(2.0, 0.0, 0.0), Vec3::splat(0.5));
    let left = scene.add_box("left", Vec3::new(-2.0, 0.0, 0.0), Vec3::splat(0.5));
    let middle = scene.add_box("middle", Vec3::ZERO, Vec3::splat(0.5));

    let mut engine = build(ExplodeConfig::radial());
    let report = engine.prepare(&scene).unwrap();
    assert_eq!(report.clusters, 3);
    assert!(engine.assembly().unwrap().plane().is_none());

    engine.set_target(1.0, true);
    engine.apply(&mut scene);
    let travel = 27.0f32.sqrt() * 0.5;
    approx_eq3(scene.local(right).unwrap(), Vec3::new(2.0 + travel, 0.0, 0.0));
    approx_eq3(scene.local(left).unwrap(), Vec3::new(-2.0 - travel, 0.0, 0.0));
    // Dead center falls back to +Y.
    approx_eq3(scene.local(middle).unwrap(), Vec3::new(0.0, travel, 0.0));
}

#[test]
fn radial_variant_ignores_anchor_names() {
    let (scene, _) = cubes_on_plate();
    let mut engine = build(ExplodeConfig::radial());
    let report = engine.prepare(&scene).unwrap();
    assert_eq!(report.active, 5);
}

proptest! {
    #[test]
    fn smoothing_converges_monotonically(
        target in 0.0f32..=1.0,
        start in 0.0f32..=1.0,
        dt in 0.001f32..0.2,
        rate in 0.5f32..20.0,
    ) {
        let mut s = ExplosionState::new();
        s.set_target(start, true);
        s.set_target(target, false);
        let k = (rate * dt).min(1.0);
        let steps = ((1000.0f32).ln() / k).ceil() as usize + 1;
        let mut gap = (target - s.current()).abs();
        for _ in 0..steps {
            s.advance(dt, rate);
            let next = (target - s.current()).abs();
            prop_assert!(next <= gap + 1e-6);
            prop_assert!(s.current() >= 0.0 && s.current() <= 1.0);
            gap = next;
        }
        prop_assert!(gap <= 1e-3 + 1e-5, "gap {gap} after {steps} steps");
    }

    #[test]
    fn set_target_always_lands_in_unit_range(f in -1.0e6f32..1.0e6) {
        let mut s = ExplosionState::new();
        s.set_target(f, false);
        prop_assert!((0.0..=1.0).contains(&s.target()));
    }

    #[test]
    fn travel_law_is_monotone_and_preserves_layers(
        base in 0.0f32..1.0,
        scale in 0.0f32..50.0,
        s_near in 0.0f32..2.0,
        extra in 0.0001f32..2.0,
        e0 in 0.0f32..=1.0,
        e1 in 0.0f32..=1.0,
    ) {
        let near = TravelLaw { base_push: base, depth_scale: scale, s_abs: s_near };
        let far = TravelLaw { s_abs: s_near + extra, ..near };
        let (lo, hi) = if e0 <= e1 { (e0, e1) } else { (e1, e0) };
        prop_assert!(near.magnitude(lo) <= near.magnitude(hi));
        prop_assert!(far.magnitude(hi) >= near.magnitude(hi));
    }

    #[test]
    fn snapped_targets_place_parts_exactly(t in 0.0f32..=1.0) {
        let (mut scene, cubes) = cubes_on_plate();
        let originals: Vec<Vec3> = cubes.iter().filter_map(|id| scene.local(*id)).collect();
        let mut engine = build(ExplodeConfig::plane("bottom"));
        engine.prepare(&scene).unwrap();
        engine.set_target(t, true);
        engine.apply(&mut scene);
        let group = &engine.groups()[0];
        let expected = group.direction().scale(group.law().magnitude(t));
        for (id, orig) in cubes.iter().zip(&originals) {
            let got = scene.local(*id).unwrap();
            for (a, b) in got.to_array().into_iter().zip(orig.add(&expected).to_array()) {
                prop_assert!((a - b).abs() <= 1e-4);
            }
        }
    }
}
