//! JDK discovery
//!
//! Ghidra needs a JDK but does not ship one. A `jdk-*` unpack under the
//! tools directory (or an explicit config path) supplies JAVA_HOME.

use crate::config::schema::ToolsConfig;
use crate::error::{DecompError, DecompResult};
use crate::tools::{exe, find_install};
use std::path::{Path, PathBuf};

/// A located JDK install
#[derive(Debug)]
pub struct Jdk {
    home: PathBuf,
}

impl Jdk {
    pub fn locate(config: &ToolsConfig, tools_dir: &Path) -> DecompResult<Self> {
        if let Some(home) = &config.jdk {
            if java_bin(home).is_file() {
                return Ok(Self { home: home.clone() });
            }
            return Err(DecompError::JdkNotFound { dir: home.clone() });
        }

        find_install(tools_dir, "jdk-", &java_marker())
            .map(|home| Self { home })
            .ok_or_else(|| DecompError::JdkNotFound {
                dir: tools_dir.to_path_buf(),
            })
    }

    /// Value for JAVA_HOME: the unpack root, two levels up from bin/java
    pub fn java_home(&self) -> &Path {
        &self.home
    }
}

fn java_marker() -> PathBuf {
    Path::new("bin").join(exe("java"))
}

fn java_bin(home: &Path) -> PathBuf {
    home.join(java_marker())
}
