//! Clean command - remove cached workspaces
//!
//! The only path in il2decomp that ever deletes a workspace. Everything
//! else treats the cache as append-only.

use crate::cli::args::CleanArgs;
use crate::config::Config;
use crate::error::DecompResult;
use crate::ui::{self, UiContext};
use crate::workspace::store::format_bytes;
use crate::workspace::{WorkspaceEntry, WorkspaceStore};
use console::style;
use tracing::info;

/// Execute the clean command
pub async fn execute(args: CleanArgs, config: &Config) -> DecompResult<()> {
    let ctx = UiContext::detect().with_auto_yes(args.yes);
    let store = WorkspaceStore::new(&config.workspace.root);

    let targets: Vec<WorkspaceEntry> = if args.all {
        store.list()?
    } else if args.ids.is_empty() {
        ui::step_info(&ctx, "Nothing to clean (pass workspace ids or --all)");
        return Ok(());
    } else {
        // Resolve every id before deleting anything
        args.ids
            .iter()
            .map(|id| store.find(id))
            .collect::<DecompResult<Vec<_>>>()?
    };

    if targets.is_empty() {
        ui::step_info(&ctx, "No cached workspaces");
        return Ok(());
    }

    let total: u64 = targets.iter().map(|e| e.size_bytes).sum();
    for entry in &targets {
        println!(
            "  {} {} ({}, {})",
            style(&entry.id).cyan(),
            entry.progress,
            format_bytes(entry.size_bytes),
            entry.modified_at.format("%Y-%m-%d %H:%M"),
        );
    }

    let message = format!(
        "Remove {} workspace(s), freeing {}?",
        targets.len(),
        format_bytes(total)
    );
    if !ui::confirm(&ctx, &message, false).await? {
        println!("Aborted.");
        return Ok(());
    }

    let mut freed = 0u64;
    for entry in &targets {
        freed += store.remove(&entry.id)?;
        info!("Removed workspace {}", entry.id);
    }

    println!(
        "{} Removed {} workspace(s), freed {}",
        style("✓").green(),
        targets.len(),
        format_bytes(freed)
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::CleanArgs;
    use crate::config::schema::WorkspaceConfig;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    fn config_with_root(root: std::path::PathBuf) -> Config {
        Config {
            workspace: WorkspaceConfig { root },
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn clean_all_removes_workspaces() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("aabbccdd")).unwrap();
        fs::create_dir(temp.path().join("11223344")).unwrap();

        let config = config_with_root(temp.path().to_path_buf());
        let args = CleanArgs {
            ids: vec![],
            all: true,
            yes: true,
        };

        execute(args, &config).await.unwrap();
        assert!(!temp.path().join("aabbccdd").exists());
        assert!(!temp.path().join("11223344").exists());
    }

    #[tokio::test]
    async fn clean_by_id_leaves_others() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("aabbccdd")).unwrap();
        fs::create_dir(temp.path().join("11223344")).unwrap();

        let config = config_with_root(temp.path().to_path_buf());
        let args = CleanArgs {
            ids: vec!["aabbccdd".to_string()],
            all: false,
            yes: true,
        };

        execute(args, &config).await.unwrap();
        assert!(!temp.path().join("aabbccdd").exists());
        assert!(temp.path().join("11223344").exists());
    }

    #[tokio::test]
    async fn clean_unknown_id_removes_nothing() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("aabbccdd")).unwrap();

        let config = config_with_root(temp.path().to_path_buf());
        let args = CleanArgs {
            ids: vec!["aabbccdd".to_string(), "deadbeef".to_string()],
            all: false,
            yes: true,
        };

        let result = execute(args, &config).await;
        assert!(result.is_err());
        assert!(temp.path().join("aabbccdd").exists());
    }

    #[tokio::test]
    #[serial]
    async fn clean_declined_keeps_workspaces() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("aabbccdd")).unwrap();

        let config = config_with_root(temp.path().to_path_buf());
        let args = CleanArgs {
            ids: vec![],
            all: true,
            yes: false,
        };

        // Without --yes the confirm runs; a CI env pins it to the
        // non-interactive path, which resolves to the default (false).
        std::env::set_var("BUILDKITE", "1");
        let result = execute(args, &config).await;
        std::env::remove_var("BUILDKITE");

        result.unwrap();
        assert!(temp.path().join("aabbccdd").exists());
    }
}
