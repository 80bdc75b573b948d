// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Strata core: exploded-view engine for rigid assemblies.
//!
//! Given the parts of an assembly and a reference (a thin anchor part or the
//! assembly center), the engine
//! 1. groups parts into rigid clusters by layer and proximity ([`cluster`]),
//! 2. derives a travel direction and law per cluster ([`travel`]),
//! 3. smooths a scalar explosion factor over time ([`controller`]) and
//!    writes per-part local positions through a [`scene::PartSink`].
//!
//! All state lives in an owned [`Exploder`]; nothing is global and no clock is
//! read, so callers inject `dt` and tests are deterministic.
//!
//! # Usage
//! ```ignore
//! let mut engine = Exploder::new(ExplodeConfig::plane("bottom"))?;
//! engine.prepare(&scene)?;
//! engine.wheel(-1.0);
//! engine.frame(1.0 / 60.0, &mut scene);
//! ```

pub mod cluster;
pub mod config;
pub mod controller;
pub mod engine;
pub mod error;
pub mod scene;
pub mod travel;

pub use config::{ConfigError, ExplodeConfig, ExplodeMode};
pub use controller::ExplosionState;
pub use engine::{Exploder, PrepareReport, PreparedAssembly};
pub use error::ExplodeError;
pub use scene::{PartId, PartKind, PartRecord, PartSink, SceneSource};
pub use travel::{Member, MotionGroup, TravelLaw};
