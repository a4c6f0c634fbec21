//! Configuration schema for il2decomp
//!
//! Configuration is stored at `~/.config/il2decomp/config.toml`

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Workspace cache settings
    pub workspace: WorkspaceConfig,

    /// External tool locations
    pub tools: ToolsConfig,

    /// Game artifact naming
    pub game: GameConfig,
}

/// Workspace cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Root directory for per-game workspaces. Relative paths resolve
    /// against the current directory.
    pub root: PathBuf,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("il2cpp-decompile"),
        }
    }
}

/// External tool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Directory scanned for tool installs (Il2CppDumper, Ghidra, a JDK).
    /// Defaults to the platform data dir when unset.
    pub dir: Option<PathBuf>,

    /// Explicit path to the Il2CppDumper executable (skips the scan)
    pub dumper: Option<PathBuf>,

    /// Explicit path to Ghidra's pyghidraRun launcher (skips the scan)
    pub ghidra: Option<PathBuf>,

    /// Explicit JDK home (skips the jdk-* scan)
    pub jdk: Option<PathBuf>,

    /// Python interpreter used for the header conversion script
    pub python: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            dir: None,
            dumper: None,
            ghidra: None,
            jdk: None,
            python: default_python().to_string(),
        }
    }
}

fn default_python() -> &'static str {
    if cfg!(windows) {
        "python"
    } else {
        "python3"
    }
}

/// Game artifact configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// File name of the IL2CPP game assembly
    pub assembly_name: String,

    /// Metadata path relative to the game's `*_Data` directory
    pub metadata_subpath: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            assembly_name: "GameAssembly.dll".to_string(),
            metadata_subpath: PathBuf::from("il2cpp_data/Metadata/global-metadata.dat"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[workspace]"));
        assert!(toml.contains("[game]"));
    }

    #[test]
    fn config_deserializes_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.game.assembly_name, "GameAssembly.dll");
    }

    #[test]
    fn config_deserializes_partial() {
        let toml = r#"
            [workspace]
            root = "/var/cache/il2decomp"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.workspace.root, PathBuf::from("/var/cache/il2decomp"));
        assert_eq!(config.game.assembly_name, "GameAssembly.dll"); // default preserved
    }
}
