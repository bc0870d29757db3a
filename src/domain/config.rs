use std::path::Path;

use serde::{Deserialize, Serialize};

/// The name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "advisor.toml";

/// How the loader treats a record whose identifier is already indexed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Store the record alongside the existing one.
    ///
    /// Lookups return the first record loaded under the identifier.
    #[default]
    Keep,

    /// Skip the record and count it as a duplicate.
    Reject,
}

/// Configuration for loading and querying the course catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Whether course identifiers are uppercased.
    ///
    /// When `true` (default), identifiers and prerequisites are uppercased as
    /// they are loaded, and lookup keys are uppercased before searching. When
    /// `false`, identifiers are stored and matched exactly as written.
    pub normalize_ids: bool,

    /// What to do with a record whose identifier is already present.
    pub duplicates: DuplicatePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            normalize_ids: default_normalize_ids(),
            duplicates: DuplicatePolicy::default(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Normalizes a lookup key according to [`Config::normalize_ids`].
    #[must_use]
    pub fn normalize_key(&self, key: &str) -> String {
        if self.normalize_ids {
            key.to_uppercase()
        } else {
            key.to_string()
        }
    }
}

const fn default_normalize_ids() -> bool {
    true
}

/// The serialized versions of the configuration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_normalize_ids")]
        normalize_ids: bool,

        #[serde(default)]
        duplicates: DuplicatePolicy,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                normalize_ids,
                duplicates,
            } => Self {
                normalize_ids,
                duplicates,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            normalize_ids: config.normalize_ids,
            duplicates: config.duplicates,
        }
    }
}
