//! Application configuration, read from `slotforge.toml` when present.
//!
//! ```toml
//! [pool]
//! estimate_max_entities = 1000
//!
//! [director]
//! start_scene = "menu"
//! max_frames = 600
//! frames_per_scene = 120
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use slotforge_core::PoolConfig;
use tracing::info;

/// Default config file, relative to the working directory.
pub const CONFIG_FILE: &str = "slotforge.toml";

/// Scene runner settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectorConfig {
    /// Scene activated at startup.
    pub start_scene: String,
    /// Frames to step before shutting down.
    pub max_frames: u64,
    /// Frames each demo scene runs before moving on.
    pub frames_per_scene: u64,
}

impl Default for DirectorConfig {
    fn default() -> Self {
        Self {
            start_scene: "menu".into(),
            max_frames: 600,
            frames_per_scene: 120,
        }
    }
}

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Storage engine sizing.
    pub pool: PoolConfig,
    /// Scene runner settings.
    pub director: DirectorConfig,
}

impl AppConfig {
    /// Loads `path`, falling back to defaults if the file does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Parses and validates a configuration.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.pool.validate()?;
        anyhow::ensure!(
            config.director.frames_per_scene > 0,
            "director.frames_per_scene must be greater than zero"
        );
        Ok(config)
    }
}
