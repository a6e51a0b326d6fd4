//! Application properties
//!
//! Tuning knobs that live outside the stored configuration: they come from
//! an optional TOML file, then environment variables override them, e.g.
//! `DOMAIN_CONFIG__SECURITY_MIN_KEY_LENGTH=48`.

use config::{Config, Environment, File};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::locale::Locale;
use crate::{ConfigError, Result};

/// Environment variable prefix for property overrides
pub const ENV_PREFIX: &str = "DOMAIN_CONFIG";

/// Smallest ephemeral security key length ever generated
pub const MIN_EPHEMERAL_KEY_LENGTH: usize = 1024;

/// Application-level properties
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppProperties {
    /// Configured security keys shorter than this are rejected
    pub security_min_key_length: usize,
    /// Length of the generated key when none is configured
    pub security_ephemeral_key_length: usize,
    pub dev_debug_mode: bool,
    pub default_locale: String,
}

impl Default for AppProperties {
    fn default() -> Self {
        Self {
            security_min_key_length: 32,
            security_ephemeral_key_length: MIN_EPHEMERAL_KEY_LENGTH,
            dev_debug_mode: false,
            default_locale: "en".to_string(),
        }
    }
}

impl AppProperties {
    /// Parse from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let properties: Self = toml::from_str(toml_str)
            .map_err(|e| ConfigError::parse(format!("TOML parse error: {e}")))?;
        properties.validate()?;
        Ok(properties)
    }

    /// Load from an optional TOML file, then apply environment overrides
    ///
    /// A missing file is not an error; defaults apply.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            if path.exists() {
                builder = builder.add_source(File::from(path));
            } else {
                debug!("Properties file does not exist: {:?}", path);
            }
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .separator("__"),
        );

        let properties: Self = builder
            .build()
            .and_then(|cfg| cfg.try_deserialize())
            .map_err(|e| ConfigError::parse(format!("properties load error: {e}")))?;
        properties.validate()?;
        Ok(properties)
    }

    pub fn validate(&self) -> Result<()> {
        if self.security_min_key_length == 0 {
            return Err(ConfigError::invalid_config(
                "security_min_key_length must be greater than zero",
            ));
        }
        if self.default_locale.trim().is_empty() {
            return Err(ConfigError::invalid_config("default_locale must not be empty"));
        }
        Ok(())
    }

    /// Ephemeral key length, never below [`MIN_EPHEMERAL_KEY_LENGTH`]
    pub fn ephemeral_key_length(&self) -> usize {
        self.security_ephemeral_key_length
            .max(MIN_EPHEMERAL_KEY_LENGTH)
    }

    pub fn default_locale(&self) -> Locale {
        Locale::parse(&self.default_locale)
    }

    /// Every property whose value differs from its default, by name
    pub fn non_default(&self) -> IndexMap<String, String> {
        let current = serde_json::to_value(self).unwrap_or_default();
        let defaults = serde_json::to_value(Self::default()).unwrap_or_default();

        let (Some(current), Some(defaults)) = (current.as_object(), defaults.as_object()) else {
            return IndexMap::new();
        };

        current
            .iter()
            .filter(|(name, value)| defaults.get(*name) != Some(*value))
            .map(|(name, value)| {
                let rendered = match value {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (name.clone(), rendered)
            })
            .collect()
    }
}
