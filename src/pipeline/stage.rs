//! Stage abstraction for the decompilation pipeline

use crate::error::DecompResult;
use crate::game::GameArtifacts;
use crate::tools::Toolchain;
use crate::workspace::Workspace;
use async_trait::async_trait;
use std::path::PathBuf;

/// Everything a stage works with
pub struct PipelineContext {
    pub workspace: Workspace,
    pub game: GameArtifacts,
    pub tools: Toolchain,
}

/// One pipeline step with declared outputs.
///
/// A stage whose outputs all exist in the workspace is skipped, which is
/// what makes re-running against an unchanged binary cheap: only the
/// steps that never finished actually run.
#[async_trait]
pub trait Stage: Send + Sync {
    /// Short name for logs and step lines
    fn name(&self) -> &'static str;

    /// Workspace-relative files this stage produces
    fn outputs(&self, ctx: &PipelineContext) -> Vec<PathBuf>;

    async fn run(&self, ctx: &PipelineContext) -> DecompResult<()>;
}
