//! Open command - launch the Ghidra GUI on a cached workspace

use crate::cli::args::OpenArgs;
use crate::config::Config;
use crate::error::{DecompError, DecompResult};
use crate::game::GameArtifacts;
use crate::tools::Toolchain;
use crate::workspace::store::{find_project, is_workspace_id};
use crate::workspace::{outputs, WorkspaceCache, WorkspaceStore};
use console::style;
use std::path::{Path, PathBuf};

/// Execute the open command
pub async fn execute(args: OpenArgs, config: &Config) -> DecompResult<()> {
    let tools = Toolchain::locate(&config.tools)?;

    // No target opens a bare Ghidra for ad-hoc work
    let Some(target) = args.target else {
        tools.ghidra.open(None)?;
        println!("{} Ghidra launched", style("✓").green());
        return Ok(());
    };

    let project = resolve_project(&target, config)?;
    tools.ghidra.open(Some(&project))?;
    println!(
        "{} Opening {} in Ghidra",
        style("✓").green(),
        style(project.display()).cyan()
    );

    Ok(())
}

/// Map a workspace id or game path to its Ghidra project file
fn resolve_project(target: &str, config: &Config) -> DecompResult<PathBuf> {
    let store = WorkspaceStore::new(&config.workspace.root);

    let dir = if is_workspace_id(target) {
        store.find(target)?.dir
    } else {
        // Treat anything else as a game path and hash our way back
        let game = GameArtifacts::locate(Path::new(target), &config.game)?;
        let id = WorkspaceCache::identify(&game.assembly)?;
        store.find(&id)?.dir
    };

    match find_project(&dir) {
        Some(stem) => Ok(dir.join(format!("{stem}.{}", outputs::PROJECT_EXT))),
        None => Err(DecompError::ProjectNotFound { path: dir }),
    }
}
