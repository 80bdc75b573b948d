// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use strata_config_fs::{
    read_config_file, ConfigService, FsConfigStore, StoreError, EXPLODE_CONFIG_KEY,
};
use strata_core::{ExplodeConfig, ExplodeMode, Exploder, PrepareReport};
use strata_scene::SceneTree;
use tracing::{info, warn};

use crate::report;
use crate::EngineArgs;

/// Where the effective engine config comes from.
pub(crate) struct ConfigSource {
    dir: Option<PathBuf>,
}

impl ConfigSource {
    pub(crate) fn new(dir: Option<PathBuf>) -> Self {
        Self { dir }
    }

    fn service(&self) -> Result<ConfigService<FsConfigStore>, StoreError> {
        let store = match &self.dir {
            Some(dir) => FsConfigStore::at(dir.clone())?,
            None => FsConfigStore::new()?,
        };
        Ok(ConfigService::new(store))
    }

    /// Explicit file, else the store, else defaults; flags override the mode.
    fn resolve(&self, args: &EngineArgs) -> Result<ExplodeConfig> {
        let mut config = match &args.config {
            Some(path) => read_config_file(path)
                .with_context(|| format!("reading config {}", path.display()))?,
            None => match self.service() {
                Ok(service) => service
                    .load_explode_config()
                    .context("loading stored config")?,
                Err(err) => {
                    warn!(%err, "config store unavailable; using defaults");
                    ExplodeConfig::default()
                }
            },
        };
        if args.radial {
            config.mode = ExplodeMode::Radial;
        } else if let Some(anchor) = &args.anchor {
            config.mode = ExplodeMode::Plane {
                anchor: anchor.clone(),
            };
        }
        Ok(config.validated()?)
    }
}

/// Scripted input for `run`.
pub(crate) struct Script {
    pub target: Option<f32>,
    pub wheel: Vec<f32>,
    pub toggle: bool,
    pub frames: u32,
    pub dt: f32,
    pub snap: bool,
}

fn load(path: &Path) -> Result<SceneTree> {
    SceneTree::from_path(path).with_context(|| format!("loading scene {}", path.display()))
}

fn prepared(config: ExplodeConfig, tree: &SceneTree, path: &Path) -> Result<(Exploder, PrepareReport)> {
    let mut engine = Exploder::new(config)?;
    let summary = engine
        .prepare(tree)
        .with_context(|| format!("preparing {}", path.display()))?;
    Ok((engine, summary))
}

pub(crate) fn inspect(
    source: &ConfigSource,
    scene: &Path,
    args: &EngineArgs,
    out: &mut impl Write,
) -> Result<()> {
    let config = source.resolve(args)?;
    let tree = load(scene)?;
    let (engine, summary) = prepared(config, &tree, scene)?;
    report::write_summary(out, &engine, &summary)?;
    writeln!(out, "{}", report::clusters_table(&tree, engine.groups()))?;
    Ok(())
}

pub(crate) fn run(
    source: &ConfigSource,
    scene: &Path,
    args: &EngineArgs,
    script: &Script,
    snapshot: Option<&Path>,
    out: &mut impl Write,
) -> Result<()> {
    let config = source.resolve(args)?;
    let mut tree = load(scene)?;
    let (mut engine, _) = prepared(config, &tree, scene)?;

    if let Some(target) = script.target {
        engine.set_target_absolute(target);
    }
    for dy in &script.wheel {
        engine.wheel(*dy);
    }
    if script.toggle {
        engine.toggle();
    }
    if script.snap {
        engine.set_target(engine.state().target(), true);
    }
    for _ in 0..script.frames {
        engine.frame(script.dt, &mut tree);
    }
    if !engine.is_inert() {
        engine.apply(&mut tree);
    }

    let state = engine.state();
    info!(
        frames = script.frames,
        current = state.current(),
        target = state.target(),
        "run finished"
    );
    writeln!(
        out,
        "explosion: current {:.4} target {:.4}",
        state.current(),
        state.target()
    )?;
    writeln!(out, "{}", report::positions_table(&tree))?;

    if let Some(path) = snapshot {
        let json = serde_json::to_string_pretty(&tree.to_desc())?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        writeln!(out, "scene written to {}", path.display())?;
    }
    Ok(())
}

pub(crate) fn config(
    source: &ConfigSource,
    args: &EngineArgs,
    save: bool,
    out: &mut impl Write,
) -> Result<()> {
    let config = source.resolve(args)?;
    writeln!(out, "{}", serde_json::to_string_pretty(&config)?)?;
    if save {
        let service = source.service().context("opening config store")?;
        service
            .save_explode_config(&config)
            .context("saving config")?;
        let path = service.store().path_for(EXPLODE_CONFIG_KEY);
        writeln!(out, "saved to {}", path.display())?;
    }
    Ok(())
}
