//! Run command - decompile a game end to end

use crate::cli::args::RunArgs;
use crate::config::Config;
use crate::error::DecompResult;
use crate::game::GameArtifacts;
use crate::pipeline::{Pipeline, PipelineContext};
use crate::tools::Toolchain;
use crate::ui::{self, TaskSpinner, UiContext};
use crate::workspace::{outputs, Workspace, WorkspaceCache};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Execute the run command
pub async fn execute(args: RunArgs, config: &Config) -> DecompResult<()> {
    let ui = UiContext::detect();
    ui::intro(&ui, "il2decomp run");

    // Locate the game first; everything downstream hangs off the assembly
    let game = GameArtifacts::locate(&args.game, &config.game)?;
    ui::step_ok_detail(
        &ui,
        &format!("Found {}", game.game_name),
        &game.assembly.display().to_string(),
    );

    // Hash the assembly into its workspace
    let mut spinner = TaskSpinner::new(&ui);
    spinner.start("Hashing game assembly...");
    let cache = WorkspaceCache::new(&config.workspace.root);
    let workspace = match cache.resolve(&game.assembly) {
        Ok(ws) => ws,
        Err(e) => {
            spinner.clear();
            return Err(e);
        }
    };
    spinner.stop("Assembly hashed");
    ui::key_value(&ui, "Workspace", workspace.id());
    ui::key_value(&ui, "Directory", &workspace.dir().display().to_string());

    let project = project_path(&workspace, &game);
    let tools = Toolchain::locate(&config.tools)?;
    ui::step_ok(&ui, "Toolchain located");

    // A finished project short-circuits the whole pipeline
    if project.is_file() && !args.fresh {
        info!("Project {} already exists", project.display());
        ui::step_info(&ui, "Ghidra project already exists, skipping analysis");
        return finish(args.no_open, &tools, &project, &ui);
    }

    let ctx = PipelineContext {
        workspace,
        game,
        tools,
    };
    Pipeline::standard().fresh(args.fresh).run(&ctx, &ui).await?;

    debug!("Pipeline finished for {}", ctx.game.game_name);
    ui::note(
        &ui,
        "Workspace outputs",
        &format!(
            "{}\n{}\n{}",
            ctx.workspace.output_path(outputs::DUMP_CS).display(),
            ctx.workspace.output_path(outputs::GHIDRA_HEADER).display(),
            project.display(),
        ),
    );

    finish(args.no_open, &ctx.tools, &project, &ui)
}

fn project_path(workspace: &Workspace, game: &GameArtifacts) -> PathBuf {
    workspace.output_path(format!("{}.{}", game.game_name, outputs::PROJECT_EXT))
}

fn finish(no_open: bool, tools: &Toolchain, project: &Path, ui: &UiContext) -> DecompResult<()> {
    if no_open {
        ui::outro_success(ui, "Decompilation complete");
        return Ok(());
    }
    tools.ghidra.open(Some(project))?;
    ui::outro_success(ui, "Decompilation complete - opening in Ghidra");
    Ok(())
}
