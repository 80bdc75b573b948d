// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use std::io::{self, Write};

use comfy_table::Table;
use strata_core::{ExplodeMode, Exploder, MotionGroup, PartKind, PrepareReport, SceneSource};
use strata_geom::Vec3;
use strata_scene::SceneTree;

fn vec3(v: Vec3) -> String {
    format!("({:.3}, {:.3}, {:.3})", v.x(), v.y(), v.z())
}

pub(crate) fn write_summary(
    out: &mut impl Write,
    engine: &Exploder,
    summary: &PrepareReport,
) -> io::Result<()> {
    match &engine.config().mode {
        ExplodeMode::Plane { anchor } => writeln!(out, "mode: plane (anchor `{anchor}`)")?,
        ExplodeMode::Radial => writeln!(out, "mode: radial")?,
    }
    if let Some(plane) = engine.assembly().and_then(|a| a.plane()) {
        writeln!(out, "plane normal: {}", vec3(plane.normal()))?;
    }
    writeln!(
        out,
        "parts: {}  movable: {}  clusters: {}  active: {}  dropped: {}",
        summary.parts, summary.movable, summary.clusters, summary.active, summary.dropped
    )?;
    writeln!(out, "diagonal: {:.4}", summary.diagonal)
}

pub(crate) fn clusters_table(tree: &SceneTree, groups: &[MotionGroup]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["cluster", "members", "direction", "depth", "travel"]);
    for (i, group) in groups.iter().enumerate() {
        let members: Vec<&str> = group
            .members()
            .iter()
            .map(|m| tree.name(m.part).unwrap_or("?"))
            .collect();
        table.add_row(vec![
            i.to_string(),
            members.join(", "),
            vec3(group.direction()),
            format!("{:.4}", group.law().s_abs),
            format!("{:.4}", group.law().magnitude(1.0)),
        ]);
    }
    table
}

pub(crate) fn positions_table(tree: &SceneTree) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["part", "kind", "local position"]);
    for part in tree.parts() {
        let kind = match part.kind {
            PartKind::Rigid => "rigid",
            PartKind::Skinned => "skinned",
        };
        let local = tree.local_position(part.id).unwrap_or(Vec3::ZERO);
        table.add_row(vec![part.name, kind.to_owned(), vec3(local)]);
    }
    table
}
