//! Game artifact location
//!
//! The caller names either the game directory or the assembly file itself.
//! The companion metadata lives under the Unity data directory, found with
//! a `*_Data` scan rather than a hardcoded name since the data directory
//! carries the game's own name.

use crate::config::schema::GameConfig;
use crate::error::{DecompError, DecompResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The input files a pipeline run works from
#[derive(Debug, Clone)]
pub struct GameArtifacts {
    pub game_dir: PathBuf,
    pub game_name: String,
    pub assembly: PathBuf,
    pub metadata: PathBuf,
}

impl GameArtifacts {
    /// Resolve the assembly and metadata for a game path. `path` may be the
    /// game directory or the assembly file itself.
    pub fn locate(path: &Path, config: &GameConfig) -> DecompResult<Self> {
        let path = path
            .canonicalize()
            .map_err(|_| DecompError::PathNotFound(path.to_path_buf()))?;

        let (game_dir, assembly) = if path.is_file() {
            if path.file_name().and_then(|n| n.to_str()) != Some(config.assembly_name.as_str()) {
                return Err(DecompError::AssemblyNotFound { path });
            }
            let dir = path
                .parent()
                .ok_or_else(|| DecompError::PathNotFound(path.clone()))?
                .to_path_buf();
            (dir, path)
        } else {
            let candidate = path.join(&config.assembly_name);
            if !candidate.is_file() {
                return Err(DecompError::AssemblyNotFound { path: candidate });
            }
            (path, candidate)
        };

        let game_name = game_dir
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or_else(|| {
                DecompError::Internal(format!("game directory {} has no name", game_dir.display()))
            })?;

        let metadata = find_metadata(&game_dir, &config.metadata_subpath)?;
        debug!(
            "Located game {} (assembly {}, metadata {})",
            game_name,
            assembly.display(),
            metadata.display()
        );

        Ok(Self {
            game_dir,
            game_name,
            assembly,
            metadata,
        })
    }

    /// Workspace-relative path a game file is staged at, preserving its
    /// location relative to the game directory's parent so the staged tree
    /// mirrors the install (`MyGame/GameAssembly.dll`, ...).
    pub fn staged_rel(&self, file: &Path) -> PathBuf {
        let base = self.game_dir.parent().unwrap_or(&self.game_dir);
        match file.strip_prefix(base) {
            Ok(rel) => rel.to_path_buf(),
            Err(_) => PathBuf::from(file.file_name().unwrap_or(file.as_os_str())),
        }
    }
}

/// Scan the game directory for `<anything>_Data/<subpath>`
fn find_metadata(game_dir: &Path, subpath: &Path) -> DecompResult<PathBuf> {
    let entries = fs::read_dir(game_dir)
        .map_err(|e| DecompError::io(format!("reading {}", game_dir.display()), e))?;

    for entry in entries.flatten() {
        let dir = entry.path();
        if !dir.is_dir() {
            continue;
        }
        let Some(name) = dir.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !name.ends_with("_Data") {
            continue;
        }
        let candidate = dir.join(subpath);
        if candidate.is_file() {
            return Ok(candidate);
        }
    }

    Err(DecompError::MetadataNotFound {
        dir: game_dir.to_path_buf(),
        pattern: format!("*_Data/{}", subpath.display()),
    })
}
