//! Optional `mytax.toml` settings.
//!
//! ```toml
//! table_dir = "tables/ya2025"
//! log_level = "debug"
//! log_file = "mytax.log"
//! locale = "ms"
//! ```
//!
//! Command-line flags take precedence over every key.

use std::path::{Path, PathBuf};

use mytax_core::Locale;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "mytax.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Rate-table directory used instead of the built-in table.
    pub table_dir: Option<PathBuf>,
    /// EnvFilter directive, e.g. `info` or `mytax_core=debug`.
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
    pub locale: Option<Locale>,
}

impl CliConfig {
    pub fn parse(
        text: &str,
        path: &Path,
    ) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    /// Loads `explicit` if given, otherwise `mytax.toml` in the working
    /// directory when present, otherwise the defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::load(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}
