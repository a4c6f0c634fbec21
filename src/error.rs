//! Error types for il2decomp
//!
//! All modules use `DecompResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Shorthand for results carrying [`DecompError`]
pub type DecompResult<T> = Result<T, DecompError>;

/// Every failure the pipeline can surface to the user
#[derive(Error, Debug)]
pub enum DecompError {
    // Game artifacts
    #[error("Failed to read artifact {path}: {source}")]
    ArtifactRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Game assembly not found: {path}")]
    AssemblyNotFound { path: PathBuf },

    #[error("Metadata not found under {dir} (expected {pattern})")]
    MetadataNotFound { dir: PathBuf, pattern: String },

    // Workspaces
    #[error("Failed to create workspace directory {path}: {source}")]
    WorkspaceCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Workspace not found: {0}")]
    WorkspaceNotFound(String),

    #[error("No Ghidra project in workspace: {path}")]
    ProjectNotFound { path: PathBuf },

    // Tools
    #[error("Il2CppDumper not found under {dir}")]
    DumperNotFound { dir: PathBuf },

    #[error("Ghidra not found under {dir}")]
    GhidraNotFound { dir: PathBuf },

    #[error("JDK not found under {dir}")]
    JdkNotFound { dir: PathBuf },

    #[error("Header conversion script not found: {path}")]
    HeaderScriptNotFound { path: PathBuf },

    #[error("{tool} exited with code {code}")]
    ToolExited { tool: String, code: i32 },

    // Config file
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown config key: {0}")]
    ConfigKeyUnknown(String),

    // Filesystem
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    // Child processes
    #[error("Failed to launch: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{command} failed:\n{stderr}")]
    CommandExecution { command: String, stderr: String },

    #[error("Process terminated by signal")]
    ProcessSignaled,

    // Encoding
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not serialize config: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // Catch-alls
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    User(String),
}

impl DecompError {
    /// Wrap an [`std::io::Error`] with a line of context for display
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// A child process that could not be started
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// A child process that ran but reported failure, with captured stderr
    pub fn command_exec(command: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self::CommandExecution {
            command: command.into(),
            stderr: stderr.into(),
        }
    }

    /// A follow-up suggestion printed under the error, when one exists
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::DumperNotFound { .. } => {
                Some("Unzip Il2CppDumper into the tools directory or set tools.dumper in the config")
            }
            Self::GhidraNotFound { .. } => {
                Some("Unpack a Ghidra release into the tools directory or set tools.ghidra in the config")
            }
            Self::JdkNotFound { .. } => {
                Some("Unpack a JDK (jdk-*) into the tools directory or set tools.jdk in the config")
            }
            Self::HeaderScriptNotFound { .. } => {
                Some("The script ships with Il2CppDumper; re-extract the dumper archive")
            }
            Self::ProjectNotFound { .. } => Some("Run: il2decomp run <game> first"),
            Self::WorkspaceNotFound(_) => Some("Run: il2decomp list to see cached workspaces"),
            Self::AssemblyNotFound { .. } => {
                Some("Pass the game directory or the assembly file itself; see game.assembly_name in the config")
            }
            Self::ConfigKeyUnknown(_) => Some("Run: il2decomp config show to list valid keys"),
            _ => None,
        }
    }

    /// Process exit code for this error. External tool failures propagate the
    /// tool's own code, IO errors surface the OS errno, everything else is 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::ToolExited { code, .. } => u8::try_from(*code).unwrap_or(1),
            Self::ArtifactRead { source, .. }
            | Self::WorkspaceCreate { source, .. }
            | Self::ConfigDirCreate { source, .. }
            | Self::Io { source, .. }
            | Self::CommandFailed { source, .. } => source
                .raw_os_error()
                .and_then(|errno| u8::try_from(errno).ok())
                .unwrap_or(1),
            _ => 1,
        }
    }
}
