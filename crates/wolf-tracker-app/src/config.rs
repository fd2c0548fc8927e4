use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;
use wolf_tracker_store::DecodePolicy;

const CONFIG_DIR: &str = ".wolf-tracker";
const CONFIG_FILE: &str = "config.toml";

/// Settings loaded from `.wolf-tracker/config.toml`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrackerConfig {
    /// How the decoder treats bad task records.
    #[serde(default)]
    pub decode: DecodePolicy,
}

impl TrackerConfig {
    /// Load configuration from `workdir`, falling back to defaults when the
    /// file does not exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn from_workdir(workdir: impl AsRef<Path>) -> Result<Self> {
        let config_path = workdir.as_ref().join(CONFIG_DIR).join(CONFIG_FILE);
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read {}", config_path.display()))?;
        toml::from_str(&contents).with_context(|| format!("failed to parse {}", config_path.display()))
    }
}
