//! Workspace inventory
//!
//! Scans the cache root to enumerate existing workspaces for the list,
//! open and clean commands. Progress is derived from which pipeline
//! output files are present, not from tracked state.

use crate::error::{DecompError, DecompResult};
use crate::workspace::outputs;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Format bytes as human-readable size (e.g., "1.5 GB")
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// How far a workspace got through the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkspaceProgress {
    /// Directory exists but nothing was staged yet
    Empty,
    /// Game artifacts copied in
    Staged,
    /// Dumper outputs present
    Dumped,
    /// Ghidra-ready header generated
    Headered,
    /// Ghidra project created
    Analyzed,
}

impl fmt::Display for WorkspaceProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::Staged => write!(f, "staged"),
            Self::Dumped => write!(f, "dumped"),
            Self::Headered => write!(f, "headered"),
            Self::Analyzed => write!(f, "analyzed"),
        }
    }
}

/// One workspace found under the cache root
#[derive(Debug, Clone, Serialize)]
pub struct WorkspaceEntry {
    pub id: String,
    pub dir: PathBuf,
    /// Project name taken from the `.gpr` stem, once one exists
    pub project: Option<String>,
    pub progress: WorkspaceProgress,
    pub size_bytes: u64,
    pub modified_at: DateTime<Utc>,
}

/// Read-only view over the workspaces under a cache root
pub struct WorkspaceStore {
    root: PathBuf,
}

impl WorkspaceStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// List all workspaces, newest first. A missing root is an empty list,
    /// not an error.
    pub fn list(&self) -> DecompResult<Vec<WorkspaceEntry>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.root)
            .map_err(|e| DecompError::io(format!("reading {}", self.root.display()), e))?;

        let mut workspaces = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !path.is_dir() || !is_workspace_id(name) {
                debug!("Skipping non-workspace entry {}", path.display());
                continue;
            }
            workspaces.push(read_entry(name, &path));
        }

        workspaces.sort_by(|a, b| b.modified_at.cmp(&a.modified_at));
        Ok(workspaces)
    }

    /// Look up a single workspace by identifier
    pub fn find(&self, id: &str) -> DecompResult<WorkspaceEntry> {
        let dir = self.root.join(id);
        if !dir.is_dir() || !is_workspace_id(id) {
            return Err(DecompError::WorkspaceNotFound(id.to_string()));
        }
        Ok(read_entry(id, &dir))
    }

    /// Remove a workspace directory, returning the bytes freed.
    /// Only ever called on explicit operator request.
    pub fn remove(&self, id: &str) -> DecompResult<u64> {
        let entry = self.find(id)?;
        fs::remove_dir_all(&entry.dir)
            .map_err(|e| DecompError::io(format!("removing {}", entry.dir.display()), e))?;
        Ok(entry.size_bytes)
    }
}

/// Workspace directory names are 8 hex chars of the artifact digest
pub fn is_workspace_id(name: &str) -> bool {
    name.len() == 8 && name.chars().all(|c| c.is_ascii_hexdigit())
}

fn read_entry(id: &str, dir: &Path) -> WorkspaceEntry {
    let (progress, project) = inspect(dir);
    let modified_at = fs::metadata(dir)
        .and_then(|m| m.modified())
        .map(DateTime::<Utc>::from)
        .unwrap_or_else(|_| Utc::now());

    WorkspaceEntry {
        id: id.to_string(),
        dir: dir.to_path_buf(),
        project,
        progress,
        size_bytes: dir_size(dir),
        modified_at,
    }
}

fn inspect(dir: &Path) -> (WorkspaceProgress, Option<String>) {
    if let Some(project) = find_project(dir) {
        return (WorkspaceProgress::Analyzed, Some(project));
    }
    if dir.join(outputs::GHIDRA_HEADER).is_file() {
        return (WorkspaceProgress::Headered, None);
    }
    if dir.join(outputs::SCRIPT_JSON).is_file() {
        return (WorkspaceProgress::Dumped, None);
    }
    if has_subdir(dir) {
        return (WorkspaceProgress::Staged, None);
    }
    (WorkspaceProgress::Empty, None)
}

/// Find the Ghidra project file in a workspace, returning its stem
pub fn find_project(dir: &Path) -> Option<String> {
    let entries = fs::read_dir(dir).ok()?;
    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) == Some(outputs::PROJECT_EXT) {
            return path
                .file_stem()
                .and_then(|s| s.to_str())
                .map(str::to_string);
        }
    }
    None
}

fn has_subdir(dir: &Path) -> bool {
    fs::read_dir(dir)
        .map(|entries| entries.flatten().any(|e| e.path().is_dir()))
        .unwrap_or(false)
}

fn dir_size(path: &Path) -> u64 {
    let Ok(entries) = fs::read_dir(path) else {
        return 0;
    };
    entries
        .flatten()
        .map(|entry| {
            let path = entry.path();
            if path.is_dir() {
                dir_size(&path)
            } else {
                entry.metadata().map(|m| m.len()).unwrap_or(0)
            }
        })
        .sum()
}
