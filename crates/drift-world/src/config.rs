// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! World configuration.

use drift_geom::{GridConfig, GridConfigError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tunables for a [`World`](crate::World).
///
/// Every field has a default, so a partial (or empty) JSON object is a valid
/// config.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Spatial index tuning.
    pub grid: GridConfig,
    /// Object count to reserve scratch space for up front.
    pub expected_objects: usize,
}

/// Error type for loading or validating a [`WorldConfig`].
#[derive(Debug, Error)]
pub enum WorldConfigError {
    /// Grid settings were rejected.
    #[error("grid config: {0}")]
    Grid(#[from] GridConfigError),
    /// The JSON document could not be parsed.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl WorldConfig {
    /// Parses and validates a JSON config document.
    pub fn from_json_str(json: &str) -> Result<Self, WorldConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the config as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, WorldConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks every nested setting.
    pub fn validate(&self) -> Result<(), WorldConfigError> {
        self.grid.validate()?;
        Ok(())
    }
}
