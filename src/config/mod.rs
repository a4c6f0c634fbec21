//! Configuration management for il2decomp
//!
//! A single TOML file; a missing file means defaults everywhere. The
//! manager only knows about paths and (de)serialization, the schema
//! lives in [`schema`].

pub mod schema;

pub use schema::Config;

use crate::error::{DecompError, DecompResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Loads and persists the config file
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::with_path(Self::default_config_path())
    }

    /// Use an explicit config file instead of the platform default
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Platform config location, e.g. `~/.config/il2decomp/config.toml`
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("il2decomp")
            .join("config.toml")
    }

    /// Default directory scanned for tool installs when `tools.dir` is
    /// unset, e.g. `~/.local/share/il2decomp/apps`
    pub fn default_tools_dir() -> PathBuf {
        dirs::data_local_dir()
            .or_else(dirs::data_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("il2decomp")
            .join("apps")
    }

    /// Load the config, falling back to defaults when the file is absent
    pub async fn load(&self) -> DecompResult<Config> {
        let path = &self.config_path;
        let content = match fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config at {}, using defaults", path.display());
                return Ok(Config::default());
            }
            Err(e) => {
                return Err(DecompError::io(
                    format!("reading config from {}", path.display()),
                    e,
                ))
            }
        };

        toml::from_str(&content).map_err(|e| DecompError::ConfigInvalid {
            path: path.clone(),
            reason: e.to_string(),
        })
    }

    /// Write the config, creating its parent directory first
    pub async fn save(&self, config: &Config) -> DecompResult<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DecompError::ConfigDirCreate {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }

        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content).await.map_err(|e| {
            DecompError::io(
                format!("writing config to {}", self.config_path.display()),
                e,
            )
        })?;

        info!("Config written to {}", self.config_path.display());
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
