//! Configuration for the CLI and API server
//!
//! An optional `agroplan.toml` next to the working directory overrides the
//! built-in defaults. Pipeline thresholds and reference tables are fixed
//! constants and deliberately not configurable.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Error, Result};

const DEFAULT_CONFIG_FILE: &str = "agroplan.toml";

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub planner: PlannerConfig,
}

/// Bind address for `agroplan serve`
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Request defaults applied by the wrappers when a field is omitted
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub default_top_n: usize,
    pub default_area_acres: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            default_top_n: crate::pipeline::DEFAULT_TOP_N,
            default_area_acres: crate::pipeline::DEFAULT_AREA_ACRES,
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicitly passed path must exist; the implicit `agroplan.toml`
    /// falls back to defaults when absent.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        if !path.exists() {
            if explicit {
                return Err(Error::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            debug!("no {DEFAULT_CONFIG_FILE} found, using default config");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config = toml::from_str(&content)?;
        debug!("loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_when_no_file_present() {
        let config = Config::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.planner.default_top_n, 5);
        assert_eq!(config.planner.default_area_acres, 1.0);
    }

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = 9000").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.planner.default_top_n, 5);
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let result = Config::load(Some(Path::new("/nonexistent/agroplan.toml")));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server\nport = ").unwrap();

        assert!(matches!(
            Config::load(Some(file.path())),
            Err(Error::Toml(_))
        ));
    }
}
