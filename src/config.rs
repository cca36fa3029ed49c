//! Service configuration.
//!
//! Loaded from a JSON file whose path is given by `FORGE_HEAD_EVENTS_CONFIG`
//! (default `forge-head-events.json`):
//!
//! ```json
//! {
//!   "listen_addr": "0.0.0.0:3000",
//!   "sink_capacity": 1024,
//!   "sources": [
//!     {
//!       "owner": "alice",
//!       "repository": "widgets",
//!       "traits": [
//!         { "kind": "branch_discovery" },
//!         { "kind": "origin_pull_request_discovery", "strategies": ["MERGE"] }
//!       ]
//!     }
//!   ]
//! }
//! ```

use std::collections::HashSet;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::source::SourceConfig;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "FORGE_HEAD_EVENTS_CONFIG";

/// Configuration file used when the environment variable is unset.
pub const DEFAULT_CONFIG_PATH: &str = "forge-head-events.json";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 3000))
}

fn default_sink_capacity() -> usize {
    1024
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: SocketAddr,

    /// Capacity of the channel between the webhook endpoint and the consumer.
    #[serde(default = "default_sink_capacity")]
    pub sink_capacity: usize,

    #[serde(default)]
    pub sources: Vec<SourceConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            listen_addr: default_listen_addr(),
            sink_capacity: default_sink_capacity(),
            sources: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Loads and validates the file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let bytes = std::fs::read(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AppConfig =
            serde_json::from_slice(&bytes).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads from the path named by [`CONFIG_ENV`], or [`DEFAULT_CONFIG_PATH`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
        Self::load(&path)
    }

    /// Checks that every source names a repository, once, and that each pull
    /// request discovery trait has at least one checkout strategy.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sink_capacity == 0 {
            return Err(ConfigError::Invalid("sink_capacity must be positive".into()));
        }

        let mut seen = HashSet::new();
        for source in &self.sources {
            if source.owner.trim().is_empty() || source.repository.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "source '{}' must have an owner and a repository",
                    source.repo_id()
                )));
            }
            for t in &source.traits {
                if let Some(strategies) = t.strategies()
                    && strategies.is_empty()
                {
                    return Err(ConfigError::Invalid(format!(
                        "source '{}' enables pull request discovery without checkout strategies",
                        source.repo_id()
                    )));
                }
            }
            let key = (
                source.owner.to_ascii_lowercase(),
                source.repository.to_ascii_lowercase(),
            );
            if !seen.insert(key) {
                return Err(ConfigError::Invalid(format!(
                    "source '{}' is configured more than once",
                    source.repo_id()
                )));
            }
        }
        Ok(())
    }
}
