//! Runtime configuration: where new nodes appear, group box size, and the image model command.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::path::Path;
use tracing::instrument;

/// Environment variable naming the external image model command.
pub const MODEL_CMD_ENV: &str = "SCULPTOR_MODEL_CMD";
/// Environment variable naming a JSON config file.
pub const CONFIG_PATH_ENV: &str = "SCULPTOR_CONFIG";

/// Configuration for a canvas and its generation pipeline. Every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SculptorConfig {
  /// Lower bound of the random spawn coordinate (both axes).
  pub spawn_min: f64,
  /// Upper bound (exclusive) of the random spawn coordinate (both axes).
  pub spawn_max: f64,
  /// Box width given to group nodes.
  pub group_width: f64,
  /// Command run by the image model; `None` renders prompts offline.
  pub model_cmd: Option<String>,
}

impl Default for SculptorConfig {
  fn default() -> Self {
    Self {
      spawn_min: 50.0,
      spawn_max: 450.0,
      group_width: 300.0,
      model_cmd: None,
    }
  }
}

impl SculptorConfig {
  /// Loads a config from a JSON file. Missing fields take their defaults.
  #[instrument(level = "trace", skip(path))]
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let bytes = std::fs::read(path).map_err(|source| ConfigError::Io {
      path: path.to_path_buf(),
      source,
    })?;
    let config: SculptorConfig =
      serde_json::from_slice(&bytes).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
      })?;
    config.validate()?;
    Ok(config)
  }

  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.spawn_min.is_nan() || self.spawn_max.is_nan() || self.spawn_min >= self.spawn_max {
      return Err(ConfigError::SpawnArea {
        min: self.spawn_min,
        max: self.spawn_max,
      });
    }
    Ok(())
  }

  /// Range new node coordinates are drawn from.
  pub fn spawn_range(&self) -> Range<f64> {
    self.spawn_min..self.spawn_max
  }
}
