//! Configuration management for Tributary.
//!
//! Configuration is read from `~/.config/tributary/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const DEFAULT_FEED_URL: &str = "https://blog.jetbrains.com/kotlin/feed/";

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub feeds: FeedsConfig,
    pub fetch: FetchConfig,
    pub storage: StorageConfig,
}

/// Feeds seeded into an empty cache.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FeedsConfig {
    pub default_urls: Vec<String>,
}

impl Default for FeedsConfig {
    fn default() -> Self {
        Self {
            default_urls: vec![DEFAULT_FEED_URL.to_string()],
        }
    }
}

impl FeedsConfig {
    pub fn new(default_urls: Vec<String>) -> Self {
        Self { default_urls }
    }

    pub fn is_default(&self, url: &str) -> bool {
        self.default_urls.iter().any(|default| default == url)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Cap on concurrent fetches. `None` fans out to every feed at once.
    pub workers: Option<usize>,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            workers: None,
            timeout_secs: 10,
            user_agent: concat!("tributary/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite database holding the feed cache. Defaults to the data dir.
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// If the config file exists but is invalid, returns an error.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            Self::create_default_config(config_path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| ConfigError::Io {
            path: config_path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path.to_path_buf(),
            source: e,
        })?;

        Ok(config)
    }

    /// Get the default config file path: `~/.config/tributary/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("tributary").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# Tributary Configuration

[feeds]
# Feeds fetched when the cache is empty. Feeds added from this list are
# flagged as defaults.
default_urls = ["https://blog.jetbrains.com/kotlin/feed/"]

[fetch]
# Maximum number of feeds fetched at once. Leave unset to fetch every
# feed concurrently.
# workers = 8

# Per-request timeout in seconds
timeout_secs = 10

# User-Agent header sent with every request
user_agent = "tributary/0.1.0"

[storage]
# SQLite database holding the feed cache.
# Default: <data dir>/tributary/tributary.db
# path = "/path/to/tributary.db"
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_deserializes() {
        let content = Config::default_config_content();
        let config: Config = toml::from_str(&content).expect("Default config should be valid TOML");

        assert_eq!(config.feeds.default_urls, vec![DEFAULT_FEED_URL]);
        assert_eq!(config.fetch.workers, None);
        assert_eq!(config.fetch.timeout_secs, 10);
        assert!(config.storage.path.is_none());
    }

    #[test]
    fn test_partial_config() {
        let content = r##"
[fetch]
workers = 4
"##;
        let config: Config = toml::from_str(content).expect("Partial config should work");

        // Custom value
        assert_eq!(config.fetch.workers, Some(4));
        // Default values
        assert_eq!(config.fetch.timeout_secs, 10);
        assert_eq!(config.feeds, FeedsConfig::default());
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").expect("Empty config should work");

        assert_eq!(config.feeds.default_urls, vec![DEFAULT_FEED_URL]);
        assert_eq!(config.storage, StorageConfig::default());
    }

    #[test]
    fn test_is_default() {
        let feeds = FeedsConfig::new(vec!["https://a/feed".into(), "https://b/feed".into()]);
        assert!(feeds.is_default("https://a/feed"));
        assert!(!feeds.is_default("https://c/feed"));
    }

    #[test]
    fn test_load_from_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tributary").join("config.toml");

        let config = Config::load_from(&path).unwrap();

        assert!(path.exists());
        assert_eq!(config.feeds, FeedsConfig::default());
        // the generated file loads back
        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.fetch, FetchConfig::default());
    }

    #[test]
    fn test_load_from_invalid_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[fetch\nworkers = ").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
