//! Integration tests for il2decomp

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn il2decomp() -> Command {
        cargo_bin_cmd!("il2decomp")
    }

    /// Config pointing workspace root and tools dir into the temp dir,
    /// keeping tests away from the user's real config and cache.
    fn write_config(temp: &TempDir) -> PathBuf {
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            format!(
                "[workspace]\nroot = {:?}\n\n[tools]\ndir = {:?}\n",
                temp.path().join("ws"),
                temp.path().join("tools"),
            ),
        )
        .unwrap();
        path
    }

    /// Minimal game install: assembly plus Unity metadata layout
    fn fake_game(root: &Path, name: &str) -> PathBuf {
        let game_dir = root.join(name);
        let metadata_dir = game_dir.join(format!("{name}_Data/il2cpp_data/Metadata"));
        std::fs::create_dir_all(&metadata_dir).unwrap();
        std::fs::write(game_dir.join("GameAssembly.dll"), b"ABC123").unwrap();
        std::fs::write(metadata_dir.join("global-metadata.dat"), b"metadata").unwrap();
        game_dir
    }

    #[test]
    fn help_displays() {
        il2decomp()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("IL2CPP decompilation pipeline"));
    }

    #[test]
    fn version_displays() {
        il2decomp()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("il2decomp"));
    }

    #[test]
    fn status_runs() {
        let temp = TempDir::new().unwrap();
        let config = write_config(&temp);

        // Reports missing tools but still exits 0
        il2decomp()
            .arg("--config")
            .arg(&config)
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("il2decomp System Status"));
    }

    #[test]
    fn config_path_displays() {
        il2decomp()
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show_displays_defaults() {
        let temp = TempDir::new().unwrap();
        let config = write_config(&temp);

        il2decomp()
            .arg("--config")
            .arg(&config)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[workspace]"))
            .stdout(predicate::str::contains("assembly_name"));
    }

    #[test]
    fn config_set_roundtrip() {
        let temp = TempDir::new().unwrap();
        let config = write_config(&temp);

        il2decomp()
            .arg("--config")
            .arg(&config)
            .args(["config", "set", "tools.python", "python3.12"])
            .assert()
            .success();

        il2decomp()
            .arg("--config")
            .arg(&config)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("python3.12"));
    }

    #[test]
    fn config_set_unknown_key_fails() {
        let temp = TempDir::new().unwrap();
        let config = write_config(&temp);

        il2decomp()
            .arg("--config")
            .arg(&config)
            .args(["config", "set", "nope.nothing", "x"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown config key"));
    }

    #[test]
    fn list_empty() {
        let temp = TempDir::new().unwrap();
        let config = write_config(&temp);

        il2decomp()
            .arg("--config")
            .arg(&config)
            .arg("list")
            .assert()
            .success()
            .stdout(predicate::str::contains("No cached workspaces"));
    }

    #[test]
    fn list_empty_json() {
        let temp = TempDir::new().unwrap();
        let config = write_config(&temp);

        il2decomp()
            .arg("--config")
            .arg(&config)
            .args(["list", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[]"));
    }

    #[test]
    fn list_shows_workspaces() {
        let temp = TempDir::new().unwrap();
        let config = write_config(&temp);
        let ws = temp.path().join("ws").join("e0bebd22");
        std::fs::create_dir_all(&ws).unwrap();
        std::fs::write(ws.join("MyGame.gpr"), "").unwrap();

        il2decomp()
            .arg("--config")
            .arg(&config)
            .arg("list")
            .assert()
            .success()
            .stdout(predicate::str::contains("e0bebd22"))
            .stdout(predicate::str::contains("analyzed"))
            .stdout(predicate::str::contains("MyGame"));
    }

    #[test]
    fn run_missing_game_fails() {
        let temp = TempDir::new().unwrap();
        let config = write_config(&temp);

        il2decomp()
            .arg("--config")
            .arg(&config)
            .args(["run", "/definitely/not/a/game"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Path not found"));
    }

    #[test]
    fn run_without_assembly_fails_with_hint() {
        let temp = TempDir::new().unwrap();
        let config = write_config(&temp);
        let game_dir = temp.path().join("Empty");
        std::fs::create_dir(&game_dir).unwrap();

        il2decomp()
            .arg("--config")
            .arg(&config)
            .arg("run")
            .arg(&game_dir)
            .assert()
            .failure()
            .stderr(predicate::str::contains("Game assembly not found"))
            .stderr(predicate::str::contains("Hint:"));
    }

    #[test]
    fn run_creates_content_addressed_workspace() {
        let temp = TempDir::new().unwrap();
        let config = write_config(&temp);
        let game_dir = fake_game(temp.path(), "MyGame");

        // No toolchain under the temp tools dir, so the run stops there,
        // but the workspace for sha256("ABC123") is already on disk.
        il2decomp()
            .arg("--config")
            .arg(&config)
            .args(["run", "--no-open"])
            .arg(&game_dir)
            .assert()
            .failure()
            .stderr(predicate::str::contains("JDK not found"));

        assert!(temp.path().join("ws").join("e0bebd22").is_dir());
    }

    #[test]
    fn rerun_reuses_workspace() {
        let temp = TempDir::new().unwrap();
        let config = write_config(&temp);
        let game_dir = fake_game(temp.path(), "MyGame");
        let ws = temp.path().join("ws").join("e0bebd22");

        for _ in 0..2 {
            il2decomp()
                .arg("--config")
                .arg(&config)
                .args(["run", "--no-open"])
                .arg(&game_dir)
                .assert()
                .failure();
        }

        assert!(ws.is_dir());
        let roots: Vec<_> = std::fs::read_dir(temp.path().join("ws"))
            .unwrap()
            .flatten()
            .collect();
        assert_eq!(roots.len(), 1);
    }

    #[test]
    fn open_without_toolchain_fails() {
        let temp = TempDir::new().unwrap();
        let config = write_config(&temp);

        il2decomp()
            .arg("--config")
            .arg(&config)
            .args(["open", "e0bebd22"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("JDK not found"));
    }

    #[test]
    fn clean_unknown_id_fails() {
        let temp = TempDir::new().unwrap();
        let config = write_config(&temp);

        il2decomp()
            .arg("--config")
            .arg(&config)
            .args(["clean", "deadbeef", "--yes"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Workspace not found"));
    }

    #[test]
    fn clean_removes_workspace() {
        let temp = TempDir::new().unwrap();
        let config = write_config(&temp);
        let ws = temp.path().join("ws").join("aabbccdd");
        std::fs::create_dir_all(&ws).unwrap();
        std::fs::write(ws.join("dump.cs"), "// dump").unwrap();

        il2decomp()
            .arg("--config")
            .arg(&config)
            .args(["clean", "aabbccdd", "--yes"])
            .assert()
            .success()
            .stdout(predicate::str::contains("freed"));

        assert!(!ws.exists());
    }

    #[test]
    fn clean_nothing_selected_is_noop() {
        let temp = TempDir::new().unwrap();
        let config = write_config(&temp);

        il2decomp()
            .arg("--config")
            .arg(&config)
            .args(["clean"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Nothing to clean"));
    }

    #[test]
    fn completions_generate() {
        il2decomp()
            .args(["completions", "bash"])
            .assert()
            .success()
            .stdout(predicate::str::contains("il2decomp"));
    }
}
