//! # Pool Configuration
//!
//! Loaded once at startup, before any component is registered.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Entity capacity used when nothing else is configured.
pub const DEFAULT_MAX_ENTITIES: usize = 1000;

/// Sizing for a [`StorageEngine`](crate::StorageEngine).
///
/// ```toml
/// estimate_max_entities = 4096
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Upper bound on simultaneously active entities. Every component store
    /// is allocated at this length.
    pub estimate_max_entities: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            estimate_max_entities: DEFAULT_MAX_ENTITIES,
        }
    }
}

impl PoolConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed TOML, [`ConfigError::Invalid`] for
    /// an unusable capacity.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Checks that the capacity is usable.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] for a zero capacity or one past `u32::MAX`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.estimate_max_entities == 0 {
            return Err(ConfigError::Invalid(
                "estimate_max_entities must be greater than zero".into(),
            ));
        }
        if u32::try_from(self.estimate_max_entities).is_err() {
            return Err(ConfigError::Invalid(format!(
                "estimate_max_entities {} exceeds u32::MAX",
                self.estimate_max_entities
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PoolConfig::from_toml_str("").unwrap();
        assert_eq!(config.estimate_max_entities, DEFAULT_MAX_ENTITIES);
    }

    #[test]
    fn test_parse() {
        let config = PoolConfig::from_toml_str("estimate_max_entities = 64").unwrap();
        assert_eq!(config.estimate_max_entities, 64);
    }

    #[test]
    fn test_zero_rejected() {
        let err = PoolConfig::from_toml_str("estimate_max_entities = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_malformed_rejected() {
        let err = PoolConfig::from_toml_str("estimate_max_entities = \"many\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = PoolConfig::load("/nonexistent/slotforge/pool.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
