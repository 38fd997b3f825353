//! Configuration management.
//!
//! Settings come from a TOML file with `DBLP_BIBMERGE_*` environment
//! overrides (`__` separates section and key, e.g.
//! `DBLP_BIBMERGE_DBLP__REQUEST_DELAY_SECS=5`). Every field has a default, so
//! running without a file is fine.
//!
//! ```toml
//! [dblp]
//! base_url = "https://dblp.org"
//! timeout_secs = 30
//! max_retries = 3
//! rate_limit_backoff_secs = 5
//! request_delay_secs = 3
//!
//! [run]
//! authors_file = "authors.txt"
//! output_file = "publications.bib"
//!
//! [logging]
//! level = "info"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::sources::DBLP_BASE_URL;

/// Name of the config file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "dblp-bibmerge.toml";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// DBLP access settings
    #[serde(default)]
    pub dblp: DblpConfig,

    /// Input and output paths
    #[serde(default)]
    pub run: RunConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// DBLP access configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DblpConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Attempts per request when rate limited
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Linear backoff step after an HTTP 429
    #[serde(default = "default_backoff")]
    pub rate_limit_backoff_secs: u64,

    /// Pause between consecutive authors
    #[serde(default = "default_request_delay")]
    pub request_delay_secs: u64,

    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for DblpConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            max_retries: default_max_retries(),
            rate_limit_backoff_secs: default_backoff(),
            request_delay_secs: default_request_delay(),
            user_agent: None,
        }
    }
}

fn default_base_url() -> String {
    DBLP_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_backoff() -> u64 {
    5
}

fn default_request_delay() -> u64 {
    3
}

/// Input/output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_authors_file")]
    pub authors_file: PathBuf,

    #[serde(default = "default_output_file")]
    pub output_file: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            authors_file: default_authors_file(),
            output_file: default_output_file(),
        }
    }
}

fn default_authors_file() -> PathBuf {
    PathBuf::from("authors.txt")
}

fn default_output_file() -> PathBuf {
    PathBuf::from("publications.bib")
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Load configuration from an optional file, applying environment overrides
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path));
    }

    let settings = builder
        .add_source(
            config::Environment::with_prefix("DBLP_BIBMERGE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// Find a config file in the working directory or the user config directory
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("dblp-bibmerge").join("config.toml"))
        .filter(|path| path.is_file())
}

/// Write a configuration as TOML
pub fn save_config(config: &Config, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(config)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.dblp.base_url, "https://dblp.org");
        assert_eq!(config.dblp.request_delay_secs, 3);
        assert_eq!(config.dblp.max_retries, 3);
        assert_eq!(config.run.output_file, PathBuf::from("publications.bib"));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_partial_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[dblp]
request_delay_secs = 0
max_retries = 5

[run]
output_file = "team.bib"
"#,
        )
        .unwrap();

        let config = load_config(Some(path.as_path())).unwrap();

        assert_eq!(config.dblp.request_delay_secs, 0);
        assert_eq!(config.dblp.max_retries, 5);
        assert_eq!(config.dblp.timeout_secs, 30);
        assert_eq!(config.run.output_file, PathBuf::from("team.bib"));
        assert_eq!(config.run.authors_file, PathBuf::from("authors.txt"));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.dblp.rate_limit_backoff_secs = 7;
        config.logging.level = "debug".to_string();
        save_config(&config, &path).unwrap();

        let loaded = load_config(Some(path.as_path())).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_config(Some(Path::new("/nonexistent/config.toml")));
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("invalid.toml");
        std::fs::write(&path, "invalid = toml = content").unwrap();

        assert!(load_config(Some(path.as_path())).is_err());
    }
}
