// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Engine configuration persistence for Strata tools.
//!
//! [`ConfigService`] serializes values as JSON and delegates bytes to a
//! [`ConfigStore`]; [`FsConfigStore`] keeps them as files under the platform
//! config directory or an explicit base path. Only configuration is stored;
//! explosion state is never persisted.

mod fs;
mod service;

pub use fs::{read_config_file, FsConfigStore};
pub use service::{ConfigService, ConfigStore, StoreError, EXPLODE_CONFIG_KEY};
