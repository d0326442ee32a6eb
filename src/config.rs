//! Session configuration loaded from a JSON file

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::DEFAULT_VOLUME_PERCENT;

pub const DEFAULT_LOG_DIR: &str = ".logs";

/// Environment variable naming the config file when no path is given
pub const CONFIG_ENV_VAR: &str = "SONGDECK_CONFIG";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Initial player volume, clamped to 0..=100
    pub default_volume: i64,
    /// Show the catalog's default songs when a search finds nothing
    pub fallback_to_catalog: bool,
    /// Catalog file replacing the built-in one
    pub catalog_path: Option<PathBuf>,
    pub log_dir: PathBuf,
    /// Artificial delay added to every catalog search
    pub search_latency_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_volume: DEFAULT_VOLUME_PERCENT as i64,
            fallback_to_catalog: true,
            catalog_path: None,
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            search_latency_ms: 0,
        }
    }
}

impl SessionConfig {
    /// Load the config at `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;

        serde_json::from_str(&content).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Resolve the config path from an explicit argument or [`CONFIG_ENV_VAR`]
    pub fn from_args_or_env(arg: Option<String>) -> Result<Self> {
        match arg.or_else(|| std::env::var(CONFIG_ENV_VAR).ok()) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();

        let config = SessionConfig::load(&dir.path().join("songdeck.json")).unwrap();

        assert_eq!(config, SessionConfig::default());
        assert_eq!(config.default_volume, 75);
        assert!(config.fallback_to_catalog);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("songdeck.json");
        std::fs::write(&path, r#"{ "default_volume": 40, "fallback_to_catalog": false }"#).unwrap();

        let config = SessionConfig::load(&path).unwrap();

        assert_eq!(config.default_volume, 40);
        assert!(!config.fallback_to_catalog);
        assert_eq!(config.log_dir, PathBuf::from(DEFAULT_LOG_DIR));
        assert!(config.catalog_path.is_none());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("songdeck.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = SessionConfig::load(&path).unwrap_err();

        assert!(err.to_string().contains("parsing config"));
    }

    #[test]
    fn explicit_path_argument_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("songdeck.json");
        std::fs::write(&path, r#"{ "search_latency_ms": 1500 }"#).unwrap();

        let config = SessionConfig::from_args_or_env(Some(path.display().to_string())).unwrap();

        assert_eq!(config.search_latency_ms, 1500);
    }
}
