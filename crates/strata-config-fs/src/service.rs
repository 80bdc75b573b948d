// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Config service and storage port.

use serde::{de::DeserializeOwned, Serialize};
use strata_core::{ConfigError, ExplodeConfig};
use thiserror::Error;
use tracing::debug;

/// Key under which the engine configuration is stored.
pub const EXPLODE_CONFIG_KEY: &str = "explode";

/// Byte storage behind [`ConfigService`], addressed by logical key.
pub trait ConfigStore {
    /// Bytes stored under `key`; [`StoreError::NotFound`] when absent.
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, StoreError>;
    /// Replaces whatever is stored under `key`.
    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), StoreError>;
}

/// Failure to read, write or decode stored configuration.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Nothing stored under the key.
    #[error("not found")]
    NotFound,
    /// Filesystem failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Stored bytes are not valid JSON for the requested type.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Stored values parsed but failed validation.
    #[error(transparent)]
    Invalid(#[from] ConfigError),
    /// The store itself could not be set up.
    #[error("other: {0}")]
    Other(String),
}

/// JSON (de)serialization on top of a [`ConfigStore`].
pub struct ConfigService<S> {
    store: S,
}

impl<S> ConfigService<S> {
    /// Wraps `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the inner store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S> ConfigService<S>
where
    S: ConfigStore,
{
    /// Value stored under `key`; `Ok(None)` when absent or empty.
    pub fn load<T>(&self, key: &str) -> Result<Option<T>, StoreError>
    where
        T: DeserializeOwned,
    {
        let bytes = match self.store.load_raw(key) {
            Ok(bytes) if !bytes.is_empty() => bytes,
            Ok(_) | Err(StoreError::NotFound) => return Ok(None),
            Err(e) => return Err(e),
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    /// Stores `value` under `key` as pretty-printed JSON.
    pub fn save<T>(&self, key: &str, value: &T) -> Result<(), StoreError>
    where
        T: Serialize,
    {
        let data = serde_json::to_vec_pretty(value)?;
        self.store.save_raw(key, &data)
    }

    /// Engine configuration, validated; defaults when nothing is stored.
    pub fn load_explode_config(&self) -> Result<ExplodeConfig, StoreError> {
        match self.load::<ExplodeConfig>(EXPLODE_CONFIG_KEY)? {
            Some(config) => Ok(config.validated()?),
            None => {
                debug!("no stored engine config; using defaults");
                Ok(ExplodeConfig::default())
            }
        }
    }

    /// Validates and persists the engine configuration.
    pub fn save_explode_config(&self, config: &ExplodeConfig) -> Result<(), StoreError> {
        config.validate()?;
        self.save(EXPLODE_CONFIG_KEY, config)
    }
}
