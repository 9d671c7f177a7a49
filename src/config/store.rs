//! Layered key/value configuration store on top of the `config` crate.
//!
//! Keys are dotted paths (`email.host`). Values come from a JSON file and
//! are overlaid by environment variables named after the key, upper-cased
//! with dots replaced by underscores (`email.host` -> `EMAIL_HOST`).

use std::path::Path;

use ::config::{Config as Layers, File, FileFormat};
use thiserror::Error;

/// Configuration lookup failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Configuration key {0} is not set")]
    Missing(String),

    #[error("Configuration key {key} has invalid value {value:?}")]
    Invalid { key: String, value: String },
}

/// Merged configuration sources with typed accessors.
#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    layers: Layers,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a JSON object file. Nested objects are addressed by dotted keys.
    /// A missing or malformed file yields an empty store.
    pub fn from_json_file(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.is_file() {
            tracing::warn!(path = %path.display(), "Config file not found, using defaults");
            return Self::new();
        }

        let source = File::from(path).format(FileFormat::Json).required(false);
        match Layers::builder().add_source(source).build() {
            Ok(layers) => {
                tracing::debug!(path = %path.display(), "Config file loaded");
                Self { layers }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Config file is not a JSON object, using defaults");
                Self::new()
            }
        }
    }

    /// Parse a JSON object.
    pub fn from_json_str(contents: &str) -> Result<Self, ::config::ConfigError> {
        let layers = Layers::builder()
            .add_source(File::from_str(contents, FileFormat::Json))
            .build()?;
        Ok(Self { layers })
    }

    /// Overlay the environment variable of each given key, if set.
    pub fn with_env_overrides(self, keys: &[&str]) -> Self {
        self.with_overrides(keys, |name| std::env::var(name).ok())
    }

    /// Overlay values from `lookup`, called with the environment name of
    /// each key.
    ///
    /// Keys are looked up one by one because a key such as
    /// `server.request_timeout_secs` cannot be recovered from its variable
    /// name by splitting on underscores.
    pub fn with_overrides(self, keys: &[&str], lookup: impl Fn(&str) -> Option<String>) -> Self {
        let overrides = keys
            .iter()
            .filter_map(|key| lookup(&env_name(key)).map(|value| ((*key).to_string(), value)));
        Self {
            layers: overlay(self.layers, overrides),
        }
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let layers = std::mem::take(&mut self.layers);
        self.layers = overlay(layers, [(key.into(), value.into())]);
    }

    pub fn get_string(&self, key: &str) -> Result<String, ConfigError> {
        self.layers
            .get_string(key)
            .map_err(|e| self.lookup_error(key, e))
    }

    pub fn get_string_or(&self, key: &str, default: &str) -> String {
        self.get_string(key).unwrap_or_else(|_| default.to_string())
    }

    /// Integer value converted into `T`; out-of-range values are invalid.
    pub fn get_number<T: TryFrom<i64>>(&self, key: &str) -> Result<T, ConfigError> {
        let value = self
            .layers
            .get_int(key)
            .map_err(|e| self.lookup_error(key, e))?;
        T::try_from(value).map_err(|_| ConfigError::Invalid {
            key: key.to_string(),
            value: value.to_string(),
        })
    }

    /// Falls back to `default` when the key is missing or not a number.
    pub fn get_number_or<T: TryFrom<i64>>(&self, key: &str, default: T) -> T {
        match self.get_number(key) {
            Ok(value) => value,
            Err(ConfigError::Invalid { key, value }) => {
                tracing::warn!(%key, %value, "Ignoring non-numeric config value");
                default
            }
            Err(ConfigError::Missing(_)) => default,
        }
    }

    /// Case-insensitive `true`/`false`. JSON booleans come back as
    /// `"true"`/`"false"` from the string accessor.
    pub fn get_bool(&self, key: &str) -> Result<bool, ConfigError> {
        let raw = self.get_string(key)?;
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(ConfigError::Invalid {
                key: key.to_string(),
                value: raw,
            }),
        }
    }

    pub fn get_bool_or(&self, key: &str, default: bool) -> bool {
        match self.get_bool(key) {
            Ok(value) => value,
            Err(ConfigError::Invalid { key, value }) => {
                tracing::warn!(%key, %value, "Ignoring non-boolean config value");
                default
            }
            Err(ConfigError::Missing(_)) => default,
        }
    }

    fn lookup_error(&self, key: &str, error: ::config::ConfigError) -> ConfigError {
        match error {
            ::config::ConfigError::NotFound(_) => ConfigError::Missing(key.to_string()),
            other => ConfigError::Invalid {
                key: key.to_string(),
                value: self
                    .layers
                    .get_string(key)
                    .unwrap_or_else(|_| other.to_string()),
            },
        }
    }
}

/// Stack `entries` as overrides above `base`. Keys that are not valid
/// paths are skipped with a warning.
fn overlay(base: Layers, entries: impl IntoIterator<Item = (String, String)>) -> Layers {
    let mut builder = Layers::builder().add_source(base.clone());
    for (key, value) in entries {
        builder = match builder.clone().set_override(key.as_str(), value) {
            Ok(next) => next,
            Err(e) => {
                tracing::warn!(%key, error = %e, "Ignoring config override");
                builder
            }
        };
    }
    builder.build().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Config overrides not applied");
        base
    })
}

/// Environment variable name for a config key.
pub fn env_name(key: &str) -> String {
    key.to_ascii_uppercase().replace('.', "_")
}
