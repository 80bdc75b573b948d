// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Strata developer CLI.
//!
//! Loads a JSON scene description, prepares the explosion engine and either
//! reports the clusters it found (`inspect`) or drives scripted input and
//! frames headlessly (`run`).

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod commands;
mod report;

/// Top-level arguments.
#[derive(Parser, Debug)]
#[command(name = "strata", author, version, about, long_about = None)]
pub struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace); logs go to stderr
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config store directory (defaults to the platform config dir)
    #[arg(long, value_name = "DIR", global = true)]
    pub config_dir: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Engine selection shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct EngineArgs {
    /// Engine config file (JSON); replaces the stored config
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Explode radially from the assembly center instead of from an anchor plane
    #[arg(long, conflicts_with = "anchor")]
    pub radial: bool,

    /// Name of the anchor part in plane mode
    #[arg(long, value_name = "NAME")]
    pub anchor: Option<String>,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Prepare a scene and print the clusters it splits into
    Inspect {
        /// Scene description (JSON)
        scene: PathBuf,
        /// Engine selection
        #[command(flatten)]
        engine: EngineArgs,
    },
    /// Drive input and frames, then print every part's local position
    Run {
        /// Scene description (JSON)
        scene: PathBuf,
        /// Engine selection
        #[command(flatten)]
        engine: EngineArgs,
        /// Initial target explosion factor (clamped to [0, 1])
        #[arg(long, allow_negative_numbers = true)]
        target: Option<f32>,
        /// Wheel delta; negative explodes. Repeatable, applied in order
        #[arg(long, allow_negative_numbers = true, value_name = "DY")]
        wheel: Vec<f32>,
        /// Toggle between assembled and exploded after the other input
        #[arg(long)]
        toggle: bool,
        /// Frames to simulate
        #[arg(long, default_value_t = 60)]
        frames: u32,
        /// Seconds per frame
        #[arg(long, default_value_t = 1.0 / 60.0)]
        dt: f32,
        /// Jump straight to the final target instead of easing
        #[arg(long)]
        snap: bool,
        /// Write the resulting scene description here
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Print the effective engine config as JSON
    Config {
        /// Engine selection
        #[command(flatten)]
        engine: EngineArgs,
        /// Persist the effective config to the store
        #[arg(long)]
        save: bool,
    },
}

fn init_tracing(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")
}

/// Parses arguments from the process and runs the selected command.
pub fn entrypoint() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;
    let mut out = io::stdout().lock();
    run(cli, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Runs an already-parsed command, writing its report to `out`.
pub fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let store = commands::ConfigSource::new(cli.config_dir);
    match cli.command {
        Command::Inspect { scene, engine } => commands::inspect(&store, &scene, &engine, out),
        Command::Run {
            scene,
            engine,
            target,
            wheel,
            toggle,
            frames,
            dt,
            snap,
            out: snapshot,
        } => {
            let script = commands::Script {
                target,
                wheel,
                toggle,
                frames,
                dt,
                snap,
            };
            commands::run(&store, &scene, &engine, &script, snapshot.as_deref(), out)
        }
        Command::Config { engine, save } => commands::config(&store, &engine, save, out),
    }
}
