//! Ghidra integration
//!
//! Drives Ghidra through its pyghidraRun launcher in two modes: headless
//! import + analysis with post-scripts, and plain UI launch. Post-scripts
//! are opaque pass-through arguments; nothing here interprets them.

use crate::config::schema::ToolsConfig;
use crate::error::{DecompError, DecompResult};
use crate::tools::{exit_ok, find_install, Jdk};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

/// A located Ghidra install, paired with the JDK it runs on
#[derive(Debug)]
pub struct Ghidra {
    launcher: PathBuf,
    jdk: Jdk,
}

/// One headless import + analysis invocation
#[derive(Debug)]
pub struct HeadlessJob {
    /// Directory the Ghidra project is created in
    pub project_dir: PathBuf,
    /// Project name, doubles as the `.gpr` stem
    pub project_name: String,
    /// Binary to import
    pub import: PathBuf,
    /// Directories searched for scripts
    pub script_dirs: Vec<PathBuf>,
    /// Scripts to run after analysis, each with one argument
    pub post_scripts: Vec<(String, PathBuf)>,
}

impl HeadlessJob {
    /// pyghidraRun argument list
    fn to_args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "--headless".into(),
            self.project_dir.clone().into(),
            self.project_name.clone().into(),
            "-import".into(),
            self.import.clone().into(),
        ];
        if !self.script_dirs.is_empty() {
            args.push("-scriptPath".into());
            args.push(join_script_path(&self.script_dirs));
        }
        for (script, arg) in &self.post_scripts {
            args.push("-postScript".into());
            args.push(script.clone().into());
            args.push(arg.clone().into());
        }
        args
    }
}

/// Ghidra parses ';' as its script path separator on every platform,
/// unlike the OS path list separator.
fn join_script_path(dirs: &[PathBuf]) -> OsString {
    let mut joined = OsString::new();
    for (i, dir) in dirs.iter().enumerate() {
        if i > 0 {
            joined.push(";");
        }
        joined.push(dir.as_os_str());
    }
    joined
}

fn launcher_marker() -> PathBuf {
    let name = if cfg!(windows) {
        "pyghidraRun.bat"
    } else {
        "pyghidraRun"
    };
    Path::new("support").join(name)
}

impl Ghidra {
    pub fn locate(config: &ToolsConfig, tools_dir: &Path, jdk: Jdk) -> DecompResult<Self> {
        let launcher = match &config.ghidra {
            Some(path) => {
                if !path.is_file() {
                    return Err(DecompError::GhidraNotFound { dir: path.clone() });
                }
                path.clone()
            }
            None => find_install(tools_dir, "ghidra_", &launcher_marker())
                .map(|dir| dir.join(launcher_marker()))
                .ok_or_else(|| DecompError::GhidraNotFound {
                    dir: tools_dir.to_path_buf(),
                })?,
        };
        Ok(Self { launcher, jdk })
    }

    pub fn launcher(&self) -> &Path {
        &self.launcher
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.launcher);
        cmd.env("JAVA_HOME", self.jdk.java_home());
        cmd
    }

    /// Import + analyze, blocking until analysis finishes. Output streams
    /// to the terminal since analysis runs for minutes on large binaries.
    pub async fn run_headless(&self, job: &HeadlessJob) -> DecompResult<()> {
        let args = job.to_args();
        info!("Running Ghidra headless analysis for {}", job.project_name);
        debug!("Executing: {} {:?}", self.launcher.display(), args);

        let status = self
            .command()
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| DecompError::command_failed(self.launcher.display().to_string(), e))?;

        exit_ok("Ghidra", status)
    }

    /// Launch the Ghidra UI, optionally on a project file, without waiting
    /// for it to exit.
    pub fn open(&self, project: Option<&Path>) -> DecompResult<()> {
        let mut cmd = self.command();
        if let Some(project) = project {
            cmd.arg(project);
        }
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        debug!("Launching Ghidra UI via {}", self.launcher.display());
        cmd.spawn()
            .map_err(|e| DecompError::command_failed(self.launcher.display().to_string(), e))?;
        info!("Ghidra launched");
        Ok(())
    }
}
