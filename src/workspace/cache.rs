//! Content-addressed workspace cache
//!
//! Every game binary maps to one reusable working directory under the cache
//! root, keyed by the SHA-256 of the binary's full contents. Re-running
//! against an unchanged binary lands in the same directory, so finished
//! pipeline outputs survive across runs.

use crate::error::{DecompError, DecompResult};
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Hex characters kept from the digest to name the workspace directory.
const ID_HEX_LEN: usize = 8;

/// Maps artifact files to per-content workspace directories under a root.
///
/// The root is explicit so tests can point the cache at a temp directory.
pub struct WorkspaceCache {
    root: PathBuf,
}

impl WorkspaceCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Compute the workspace identifier for an artifact: the first 8 hex
    /// characters of the SHA-256 digest of its full contents. The file is
    /// streamed through the hasher, never loaded whole.
    pub fn identify(artifact: &Path) -> DecompResult<String> {
        let read_err = |e: io::Error| DecompError::ArtifactRead {
            path: artifact.to_path_buf(),
            source: e,
        };

        let mut file = fs::File::open(artifact).map_err(read_err)?;
        let mut hasher = Sha256::new();
        io::copy(&mut file, &mut hasher).map_err(read_err)?;
        let digest = hasher.finalize();

        Ok(hex::encode(&digest[..ID_HEX_LEN / 2]))
    }

    /// Resolve the workspace for an artifact, creating its directory on
    /// first use. Existing directories are reused untouched; creation is
    /// idempotent, so racing calls for the same artifact both succeed.
    pub fn resolve(&self, artifact: &Path) -> DecompResult<Workspace> {
        let id = Self::identify(artifact)?;
        let dir = self.root.join(&id);

        fs::create_dir_all(&dir).map_err(|e| DecompError::WorkspaceCreate {
            path: dir.clone(),
            source: e,
        })?;

        debug!("Workspace {} at {}", id, dir.display());
        Ok(Workspace { id, dir })
    }

    /// Directory an identifier would map to, without creating anything.
    pub fn dir_for(&self, id: &str) -> PathBuf {
        self.root.join(id)
    }
}

/// A resolved cache entry: identifier plus its directory on disk.
#[derive(Debug, Clone)]
pub struct Workspace {
    id: String,
    dir: PathBuf,
}

impl Workspace {
    /// Wrap an already-existing workspace directory (listing, open-by-id).
    pub fn at(id: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            dir: dir.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Absolute path a workspace-relative output would live at.
    pub fn output_path(&self, rel: impl AsRef<Path>) -> PathBuf {
        self.dir.join(rel)
    }

    /// Whether a workspace-relative output already exists. Pipeline stages
    /// use this to skip work that finished in an earlier run.
    pub fn has_output(&self, rel: impl AsRef<Path>) -> bool {
        self.output_path(rel).exists()
    }
}
