//! Decompilation pipeline
//!
//! Runs the stages in order, skipping any stage whose declared outputs
//! already exist in the workspace unless a fresh run is forced. A stage
//! failure aborts the run; nothing retries.

pub mod stage;
pub mod stages;

pub use stage::{PipelineContext, Stage};

use crate::error::DecompResult;
use crate::ui::{self, UiContext};
use tracing::{debug, info};

/// Ordered stage list with output-based skipping
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
    fresh: bool,
}

impl Pipeline {
    /// The standard four-stage decompilation flow
    pub fn standard() -> Self {
        Self::with_stages(vec![
            Box::new(stages::StageArtifacts),
            Box::new(stages::Dump),
            Box::new(stages::Header),
            Box::new(stages::Import),
        ])
    }

    pub fn with_stages(stages: Vec<Box<dyn Stage>>) -> Self {
        Self {
            stages,
            fresh: false,
        }
    }

    /// Force every stage to run even when its outputs exist
    pub fn fresh(mut self, fresh: bool) -> Self {
        self.fresh = fresh;
        self
    }

    pub async fn run(&self, ctx: &PipelineContext, ui_ctx: &UiContext) -> DecompResult<()> {
        for stage in &self.stages {
            let outputs = stage.outputs(ctx);
            let done =
                !outputs.is_empty() && outputs.iter().all(|rel| ctx.workspace.has_output(rel));

            if done && !self.fresh {
                info!("Stage {} outputs exist, skipping", stage.name());
                ui::step_info(ui_ctx, &format!("{}: reusing existing outputs", stage.name()));
                continue;
            }

            debug!("Running stage {}", stage.name());
            stage.run(ctx).await?;
            ui::step_ok(ui_ctx, &format!("{} complete", stage.name()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{GameConfig, ToolsConfig};
    use crate::game::GameArtifacts;
    use crate::tools::Toolchain;
    use crate::workspace::WorkspaceCache;
    use async_trait::async_trait;
    use std::path::{Path, PathBuf};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tempfile::TempDir;

    struct CountingStage {
        marker: &'static str,
        runs: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Stage for CountingStage {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn outputs(&self, _ctx: &PipelineContext) -> Vec<PathBuf> {
            vec![PathBuf::from(self.marker)]
        }

        async fn run(&self, ctx: &PipelineContext) -> DecompResult<()> {
            self.runs.fetch_add(1, Ordering::SeqCst);
            std::fs::write(ctx.workspace.output_path(self.marker), "done").unwrap();
            Ok(())
        }
    }

    fn fake_context(root: &Path) -> PipelineContext {
        let game_dir = root.join("MyGame");
        let metadata_dir = game_dir.join("MyGame_Data/il2cpp_data/Metadata");
        std::fs::create_dir_all(&metadata_dir).unwrap();
        std::fs::write(game_dir.join("GameAssembly.dll"), b"assembly").unwrap();
        std::fs::write(metadata_dir.join("global-metadata.dat"), b"metadata").unwrap();
        let game = GameArtifacts::locate(&game_dir, &GameConfig::default()).unwrap();

        let tools_dir = root.join("tools");
        let dumper_dir = tools_dir.join("Il2CppDumper");
        std::fs::create_dir_all(&dumper_dir).unwrap();
        std::fs::write(dumper_dir.join(crate::tools::exe("Il2CppDumper")), "").unwrap();
        std::fs::create_dir_all(tools_dir.join("jdk-21/bin")).unwrap();
        std::fs::write(
            tools_dir.join("jdk-21/bin").join(crate::tools::exe("java")),
            "",
        )
        .unwrap();
        std::fs::create_dir_all(tools_dir.join("ghidra_11.2_PUBLIC/support")).unwrap();
        let launcher_name = if cfg!(windows) {
            "pyghidraRun.bat"
        } else {
            "pyghidraRun"
        };
        std::fs::write(
            tools_dir.join("ghidra_11.2_PUBLIC/support").join(launcher_name),
            "",
        )
        .unwrap();
        let tools = Toolchain::locate(&ToolsConfig {
            dir: Some(tools_dir),
            ..Default::default()
        })
        .unwrap();

        let cache = WorkspaceCache::new(root.join("ws"));
        let workspace = cache.resolve(&game.assembly).unwrap();

        PipelineContext {
            workspace,
            game,
            tools,
        }
    }

    #[tokio::test]
    async fn second_run_skips_finished_stage() {
        let temp = TempDir::new().unwrap();
        let ctx = fake_context(temp.path());
        let runs = Arc::new(AtomicUsize::new(0));
        let pipeline = Pipeline::with_stages(vec![Box::new(CountingStage {
            marker: "marker.txt",
            runs: runs.clone(),
        })]);
        let ui_ctx = UiContext::non_interactive();

        pipeline.run(&ctx, &ui_ctx).await.unwrap();
        pipeline.run(&ctx, &ui_ctx).await.unwrap();

        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn fresh_run_ignores_existing_outputs() {
        let temp = TempDir::new().unwrap();
        let ctx = fake_context(temp.path());
        let runs = Arc::new(AtomicUsize::new(0));
        let pipeline = Pipeline::with_stages(vec![Box::new(CountingStage {
            marker: "marker.txt",
            runs: runs.clone(),
        })])
        .fresh(true);
        let ui_ctx = UiContext::non_interactive();

        pipeline.run(&ctx, &ui_ctx).await.unwrap();
        pipeline.run(&ctx, &ui_ctx).await.unwrap();

        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }
}
