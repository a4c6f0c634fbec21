//! Concrete pipeline stages
//!
//! Four stages mirror the manual workflow: stage the game files into the
//! workspace, dump with Il2CppDumper, convert the header for Ghidra, then
//! import and analyze headless. Stage order matters; each consumes what
//! the previous one left in the workspace.

use crate::error::{DecompError, DecompResult};
use crate::pipeline::stage::{PipelineContext, Stage};
use crate::tools::HeadlessJob;
use crate::workspace::outputs;
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::fs;
use tokio::process::Command;
use tracing::{debug, info};

/// Post-script materialized into the workspace for the import stage
pub const PARSE_HEADER_SCRIPT: &str = "parse_header.py";
const PARSE_HEADER_SRC: &str = include_str!("../ghidra_scripts/parse_header.py");

/// Dumper-shipped post-script that applies script.json symbols
const STRUCT_SCRIPT: &str = "ghidra_with_struct.py";

const ERROR_TAIL_LINES: usize = 20;

/// Copy assembly and metadata into the workspace, mirroring their layout
/// relative to the game directory's parent so later stages and the Ghidra
/// project see a stable tree.
pub struct StageArtifacts;

#[async_trait]
impl Stage for StageArtifacts {
    fn name(&self) -> &'static str {
        "stage"
    }

    fn outputs(&self, ctx: &PipelineContext) -> Vec<PathBuf> {
        vec![
            ctx.game.staged_rel(&ctx.game.assembly),
            ctx.game.staged_rel(&ctx.game.metadata),
        ]
    }

    async fn run(&self, ctx: &PipelineContext) -> DecompResult<()> {
        for source in [&ctx.game.assembly, &ctx.game.metadata] {
            let dest = ctx.workspace.output_path(ctx.game.staged_rel(source));
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| DecompError::io(format!("creating {}", parent.display()), e))?;
            }
            fs::copy(source, &dest).await.map_err(|e| {
                DecompError::io(
                    format!("copying {} to {}", source.display(), dest.display()),
                    e,
                )
            })?;
            debug!("Staged {}", dest.display());
        }
        Ok(())
    }
}

/// Run Il2CppDumper against the staged copies
pub struct Dump;

#[async_trait]
impl Stage for Dump {
    fn name(&self) -> &'static str {
        "dump"
    }

    fn outputs(&self, _ctx: &PipelineContext) -> Vec<PathBuf> {
        [outputs::DUMP_CS, outputs::IL2CPP_HEADER, outputs::SCRIPT_JSON]
            .iter()
            .map(PathBuf::from)
            .collect()
    }

    async fn run(&self, ctx: &PipelineContext) -> DecompResult<()> {
        let assembly = ctx
            .workspace
            .output_path(ctx.game.staged_rel(&ctx.game.assembly));
        let metadata = ctx
            .workspace
            .output_path(ctx.game.staged_rel(&ctx.game.metadata));
        ctx.tools
            .dumper
            .dump(&assembly, &metadata, ctx.workspace.dir())
            .await
    }
}

/// Convert the dumper's il2cpp.h into a Ghidra-parseable header.
///
/// The dumper-shipped script reads il2cpp.h from its working directory
/// and writes il2cpp_ghidra.h beside it, so it runs with the workspace
/// as cwd. Its output is captured and only surfaces on failure.
pub struct Header;

#[async_trait]
impl Stage for Header {
    fn name(&self) -> &'static str {
        "header"
    }

    fn outputs(&self, _ctx: &PipelineContext) -> Vec<PathBuf> {
        vec![PathBuf::from(outputs::GHIDRA_HEADER)]
    }

    async fn run(&self, ctx: &PipelineContext) -> DecompResult<()> {
        let script = ctx.tools.dumper.header_script()?;
        let command_line = format!("{} {}", ctx.tools.python, script.display());
        info!("Generating {}", outputs::GHIDRA_HEADER);
        debug!("Executing: {}", command_line);

        let output = Command::new(&ctx.tools.python)
            .arg(&script)
            .current_dir(ctx.workspace.dir())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| DecompError::command_failed(command_line.clone(), e))?;

        if !output.status.success() {
            let stdout = String::from_utf8_lossy(&output.stdout);
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DecompError::command_exec(
                command_line,
                error_tail(&stdout, &stderr),
            ));
        }
        Ok(())
    }
}

/// Import the staged assembly into a headless Ghidra project, then run the
/// post-scripts: the bundled one parses the generated header into Ghidra's
/// type manager, the dumper-shipped one applies script.json symbols.
pub struct Import;

#[async_trait]
impl Stage for Import {
    fn name(&self) -> &'static str {
        "import"
    }

    fn outputs(&self, ctx: &PipelineContext) -> Vec<PathBuf> {
        vec![PathBuf::from(format!(
            "{}.{}",
            ctx.game.game_name,
            outputs::PROJECT_EXT
        ))]
    }

    async fn run(&self, ctx: &PipelineContext) -> DecompResult<()> {
        let script_dest = ctx.workspace.output_path(PARSE_HEADER_SCRIPT);
        fs::write(&script_dest, PARSE_HEADER_SRC)
            .await
            .map_err(|e| DecompError::io(format!("writing {}", script_dest.display()), e))?;

        let job = HeadlessJob {
            project_dir: ctx.workspace.dir().to_path_buf(),
            project_name: ctx.game.game_name.clone(),
            import: ctx
                .workspace
                .output_path(ctx.game.staged_rel(&ctx.game.assembly)),
            script_dirs: vec![
                ctx.workspace.dir().to_path_buf(),
                ctx.tools.dumper.dir().to_path_buf(),
            ],
            post_scripts: vec![
                (
                    PARSE_HEADER_SCRIPT.to_string(),
                    ctx.workspace.output_path(outputs::GHIDRA_HEADER),
                ),
                (
                    STRUCT_SCRIPT.to_string(),
                    ctx.workspace.output_path(outputs::SCRIPT_JSON),
                ),
            ],
        };
        ctx.tools.ghidra.run_headless(&job).await
    }
}

/// Last lines of a failed tool's combined output, for error messages
fn error_tail(stdout: &str, stderr: &str) -> String {
    let lines: Vec<&str> = stdout.lines().chain(stderr.lines()).collect();
    let skip = lines.len().saturating_sub(ERROR_TAIL_LINES);
    lines[skip..].join("\n")
}
