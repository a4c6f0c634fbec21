//! External tool discovery and invocation
//!
//! il2decomp never installs tools. They are located under the configured
//! tools directory (or at explicit config paths) and invoked as-is; a
//! missing tool fails with a placement hint.

pub mod dumper;
pub mod ghidra;
pub mod jdk;

pub use dumper::Dumper;
pub use ghidra::{Ghidra, HeadlessJob};
pub use jdk::Jdk;

use crate::config::schema::ToolsConfig;
use crate::config::ConfigManager;
use crate::error::{DecompError, DecompResult};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

/// Resolved set of external tools for a pipeline run
pub struct Toolchain {
    pub dumper: Dumper,
    pub ghidra: Ghidra,
    pub python: String,
}

impl Toolchain {
    /// Locate every tool the pipeline needs, failing on the first missing one
    pub fn locate(config: &ToolsConfig) -> DecompResult<Self> {
        let dir = tools_dir(config);
        let jdk = Jdk::locate(config, &dir)?;
        Ok(Self {
            dumper: Dumper::locate(config, &dir)?,
            ghidra: Ghidra::locate(config, &dir, jdk)?,
            python: config.python.clone(),
        })
    }
}

/// The directory scanned for tool installs
pub fn tools_dir(config: &ToolsConfig) -> PathBuf {
    config
        .dir
        .clone()
        .unwrap_or_else(ConfigManager::default_tools_dir)
}

/// Platform executable name (`java` vs `java.exe`)
pub(crate) fn exe(name: &str) -> String {
    if cfg!(windows) {
        format!("{name}.exe")
    } else {
        name.to_string()
    }
}

/// Find the first directory under `dir` whose name starts with `prefix` and
/// which contains `marker`. Versioned tool unpacks (`jdk-21.0.2`,
/// `ghidra_11.2_PUBLIC`) are found without pinning a version.
pub(crate) fn find_install(dir: &Path, prefix: &str, marker: &Path) -> Option<PathBuf> {
    let entries = fs::read_dir(dir).ok()?;
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.starts_with(prefix) && path.join(marker).is_file() {
            return Some(path);
        }
    }
    None
}

/// Check a child exit status, keeping the tool's own code on failure
pub(crate) fn exit_ok(tool: &str, status: ExitStatus) -> DecompResult<()> {
    if status.success() {
        return Ok(());
    }
    match status.code() {
        Some(code) => Err(DecompError::ToolExited {
            tool: tool.to_string(),
            code,
        }),
        None => Err(DecompError::ProcessSignaled),
    }
}
