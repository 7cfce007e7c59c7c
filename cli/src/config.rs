//! Host configuration.
//!
//! Settings are read from a TOML file, then environment overrides are
//! applied, then command line flags (handled in `main`).
//!
//! ```toml
//! data_path = "data/diagnoses.json"
//! handout_dir = "handouts"
//! log_filter = "info"
//! ```
//!
//! Every key is optional. A missing default config file is not an error; a
//! config file named explicitly with `--config` must exist.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use psyref_contracts::error::{PsyrefError, PsyrefResult};

/// The config file looked for in the working directory when `--config` is
/// not given.
pub const DEFAULT_CONFIG_FILE: &str = "psyref.toml";

/// Overrides `data_path`.
pub const ENV_DATA_PATH: &str = "PSYREF_DATA_PATH";

/// Overrides `handout_dir`.
pub const ENV_HANDOUT_DIR: &str = "PSYREF_HANDOUT_DIR";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// The JSON card collection.
    pub data_path: PathBuf,

    /// Where `psyref handout` writes files.
    pub handout_dir: PathBuf,

    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/diagnoses.json"),
            handout_dir: PathBuf::from("."),
            log_filter: "warn".to_string(),
        }
    }
}

impl AppConfig {
    /// Parse `s` as TOML configuration.
    ///
    /// Returns `PsyrefError::ConfigError` for malformed TOML or unknown keys.
    pub fn from_toml_str(s: &str) -> PsyrefResult<Self> {
        toml::from_str(s).map_err(|e| PsyrefError::ConfigError {
            reason: format!("failed to parse config TOML: {}", e),
        })
    }

    /// Read and parse the config file at `path`.
    pub fn from_file(path: &Path) -> PsyrefResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| PsyrefError::ConfigError {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Resolve the effective configuration.
    ///
    /// `explicit` is the `--config` flag. Without it, [`DEFAULT_CONFIG_FILE`]
    /// is used when present and built-in defaults otherwise. Environment
    /// overrides are applied last.
    pub fn load(explicit: Option<&Path>) -> PsyrefResult<Self> {
        let config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };

        Ok(config.with_overrides(|key| std::env::var(key).ok()))
    }

    /// Apply overrides from `lookup` (normally the process environment).
    /// Empty values are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(path) = lookup(ENV_DATA_PATH).filter(|v| !v.is_empty()) {
            self.data_path = PathBuf::from(path);
        }
        if let Some(dir) = lookup(ENV_HANDOUT_DIR).filter(|v| !v.is_empty()) {
            self.handout_dir = PathBuf::from(dir);
        }
        self
    }
}
