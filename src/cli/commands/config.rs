//! Config command - inspect and edit the TOML config file

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigManager};
use crate::error::{DecompError, DecompResult};
use crate::ui::{self, UiContext};
use std::path::PathBuf;

/// Execute the config command
pub async fn execute(args: ConfigArgs, config: &Config, manager: &ConfigManager) -> DecompResult<()> {
    match args.action {
        None | Some(ConfigAction::Show) => show_config(config),
        Some(ConfigAction::Path) => show_path(manager),
        Some(ConfigAction::Init { force }) => init_config(manager, force).await?,
        Some(ConfigAction::Set { key, value }) => set_value(manager, config, &key, &value).await?,
    }

    Ok(())
}

fn show_config(config: &Config) {
    let toml =
        toml::to_string_pretty(config).unwrap_or_else(|_| "# config not renderable".to_string());
    println!("{}", toml);
}

fn show_path(manager: &ConfigManager) {
    println!("{}", manager.path().display());
}

async fn init_config(manager: &ConfigManager, force: bool) -> DecompResult<()> {
    let ctx = UiContext::detect();
    let path = manager.path();

    if path.exists() && !force {
        ui::step_warn_hint(
            &ctx,
            &format!("A config file already exists at {}", path.display()),
            "Pass --force to replace it",
        );
        return Ok(());
    }

    let config = Config::default();
    manager.save(&config).await?;

    ui::step_ok_detail(&ctx, "Default config written", &path.display().to_string());

    Ok(())
}

async fn set_value(
    manager: &ConfigManager,
    config: &Config,
    key: &str,
    value: &str,
) -> DecompResult<()> {
    let ctx = UiContext::detect();
    let mut config = config.clone();

    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["workspace", "root"] => config.workspace.root = PathBuf::from(value),

        ["tools", "dir"] => config.tools.dir = Some(PathBuf::from(value)),
        ["tools", "dumper"] => config.tools.dumper = Some(PathBuf::from(value)),
        ["tools", "ghidra"] => config.tools.ghidra = Some(PathBuf::from(value)),
        ["tools", "jdk"] => config.tools.jdk = Some(PathBuf::from(value)),
        ["tools", "python"] => config.tools.python = value.to_string(),

        ["game", "assembly_name"] => config.game.assembly_name = value.to_string(),
        ["game", "metadata_subpath"] => config.game.metadata_subpath = PathBuf::from(value),

        _ => {
            ui::remark(&ctx, "Valid keys:");
            print_valid_keys();
            return Err(DecompError::ConfigKeyUnknown(key.to_string()));
        }
    }

    manager.save(&config).await?;
    ui::step_ok(&ctx, &format!("Set {} = {}", key, value));

    Ok(())
}

fn print_valid_keys() {
    let keys = [
        "workspace.root",
        "tools.dir",
        "tools.dumper",
        "tools.ghidra",
        "tools.jdk",
        "tools.python",
        "game.assembly_name",
        "game.metadata_subpath",
    ];

    for key in keys {
        eprintln!("  {}", key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn set_value_persists() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_path(temp.path().join("config.toml"));
        let config = Config::default();

        set_value(&manager, &config, "tools.python", "python3.12")
            .await
            .unwrap();

        let loaded = manager.load().await.unwrap();
        assert_eq!(loaded.tools.python, "python3.12");
    }

    #[tokio::test]
    async fn set_unknown_key_errors() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_path(temp.path().join("config.toml"));
        let config = Config::default();

        let err = set_value(&manager, &config, "nope.nothing", "x")
            .await
            .unwrap_err();
        assert!(matches!(err, DecompError::ConfigKeyUnknown(_)));
        assert!(!manager.path().exists());
    }

    #[tokio::test]
    async fn init_does_not_clobber_without_force() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "# mine").unwrap();
        let manager = ConfigManager::with_path(path.clone());

        init_config(&manager, false).await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine");

        init_config(&manager, true).await.unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("[workspace]"));
    }
}
