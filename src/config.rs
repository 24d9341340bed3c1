//! Engine configuration
//!
//! Loaded from YAML; every field has a default so an empty document is a
//! valid configuration.
//!
//! ```yaml
//! acceptance_threshold: 5.0
//! rng_seed: 42
//! knowledge_file: config/keywords.yaml
//! fallback_reply: "Desculpe, não entendi. Poderia reformular?"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::matching::ACCEPTANCE_THRESHOLD;

/// Environment variable naming the config file
pub const CONFIG_PATH_ENV: &str = "KB_INTENT_CONFIG";

/// Environment variable overriding the random seed
pub const SEED_ENV: &str = "KB_INTENT_SEED";

/// Reply shown when no keyword matches
pub const DEFAULT_FALLBACK_REPLY: &str = "Desculpe, não entendi. Poderia reformular?";

/// Root configuration for an [`crate::IntentEngine`]
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Minimum score a match must reach; may be raised above, never lowered
    /// below, [`ACCEPTANCE_THRESHOLD`]
    pub acceptance_threshold: f64,
    /// Seed for response selection; entropy-seeded when absent
    pub rng_seed: Option<u64>,
    /// Knowledge batch applied on startup
    pub knowledge_file: Option<PathBuf>,
    /// Reply used by front ends when nothing matches
    pub fallback_reply: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            acceptance_threshold: ACCEPTANCE_THRESHOLD,
            rng_seed: None,
            knowledge_file: None,
            fallback_reply: DEFAULT_FALLBACK_REPLY.to_string(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes as unit, not as an empty map
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: EngineConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `KB_INTENT_CONFIG` if set, defaults otherwise, then apply
    /// `KB_INTENT_SEED`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };
        if let Ok(seed) = std::env::var(SEED_ENV) {
            config.rng_seed = Some(seed.trim().parse().map_err(|_| {
                ConfigError::Invalid(format!("{SEED_ENV} must be an unsigned integer, got {seed:?}"))
            })?);
        }
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.acceptance_threshold.is_finite()
            || self.acceptance_threshold < ACCEPTANCE_THRESHOLD
        {
            return Err(ConfigError::Invalid(format!(
                "acceptance_threshold must be a finite number of at least {ACCEPTANCE_THRESHOLD}, got {}",
                self.acceptance_threshold
            )));
        }
        Ok(())
    }
}
