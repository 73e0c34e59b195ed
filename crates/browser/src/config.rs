use core_types::NavigationTarget;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const DEFAULT_ADDRESS: &str = "https://steamcommunity.com/groups/POSSESSION";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Shell configuration
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct ShellConfig {
    pub target: TargetConfig,
    pub window: WindowConfig,
    pub network: NetworkConfig,
}

/// The page the screen opens on
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct TargetConfig {
    pub address: String,
    pub label: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Window size in logical pixels
    pub width: u32,
    pub height: u32,
}

/// Page loader settings
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct NetworkConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Upper bound on the bytes read from one page
    pub max_body_bytes: u64,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            label: "title".to_string(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 420,
            height: 780,
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 15,
            user_agent: format!("webview-shell/{}", env!("CARGO_PKG_VERSION")),
            max_body_bytes: 512 * 1024,
        }
    }
}

impl ShellConfig {
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "webview-shell")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from the user config dir, or defaults if it is
    /// missing or unreadable.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(err) => {
                warn!("{err}; using default configuration");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn navigation_target(&self) -> NavigationTarget {
        NavigationTarget::new(self.target.address.clone(), self.target.label.clone())
    }

    pub fn fetch_options(&self) -> net::FetchOptions {
        net::FetchOptions {
            timeout: Duration::from_secs(self.network.timeout_secs),
            user_agent: self.network.user_agent.clone(),
            max_body_bytes: self.network.max_body_bytes,
        }
    }
}
