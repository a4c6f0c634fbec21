//! Il2CppDumper integration
//!
//! The dumper is treated as an opaque executable: it gets the assembly,
//! the metadata and an output directory, and what it writes there is only
//! ever checked for existence.

use crate::config::schema::ToolsConfig;
use crate::error::{DecompError, DecompResult};
use crate::tools::{exe, exit_ok};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::fs;
use tokio::process::Command;
use tracing::{debug, info};

const HEADER_SCRIPT: &str = "il2cpp_header_to_ghidra.py";

/// A located Il2CppDumper install
#[derive(Debug)]
pub struct Dumper {
    exe: PathBuf,
    dir: PathBuf,
}

impl Dumper {
    pub fn locate(config: &ToolsConfig, tools_dir: &Path) -> DecompResult<Self> {
        let exe = match &config.dumper {
            Some(path) => path.clone(),
            None => tools_dir.join("Il2CppDumper").join(exe("Il2CppDumper")),
        };
        if !exe.is_file() {
            let dir = match &config.dumper {
                Some(path) => path.clone(),
                None => tools_dir.to_path_buf(),
            };
            return Err(DecompError::DumperNotFound { dir });
        }
        let dir = exe
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(Self { exe, dir })
    }

    /// Install directory, also a Ghidra script path entry since the dumper
    /// ships its own post-script
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn exe_path(&self) -> &Path {
        &self.exe
    }

    /// Path of the dumper-shipped header conversion script
    pub fn header_script(&self) -> DecompResult<PathBuf> {
        let path = self.dir.join(HEADER_SCRIPT);
        if path.is_file() {
            Ok(path)
        } else {
            Err(DecompError::HeaderScriptNotFound { path })
        }
    }

    /// The dumper stops for a keypress at the end unless RequireAnyKey is
    /// off in its sibling config.json. Rewrites the setting when it is
    /// absent or on, preserving everything else in the file.
    pub async fn ensure_batch_mode(&self) -> DecompResult<()> {
        let path = self.dir.join("config.json");
        let mut settings: serde_json::Value = match fs::read_to_string(&path).await {
            Ok(text) => serde_json::from_str(&text)?,
            Err(_) => serde_json::json!({}),
        };
        if !settings.is_object() {
            settings = serde_json::json!({});
        }

        if settings.get("RequireAnyKey").and_then(|v| v.as_bool()) == Some(false) {
            return Ok(());
        }

        settings["RequireAnyKey"] = serde_json::json!(false);
        fs::write(&path, serde_json::to_string_pretty(&settings)?)
            .await
            .map_err(|e| DecompError::io(format!("writing {}", path.display()), e))?;
        debug!("Disabled RequireAnyKey in {}", path.display());
        Ok(())
    }

    /// Run the dumper, streaming its output to the terminal.
    /// CLI shape: `Il2CppDumper <assembly> <metadata> <out_dir>`.
    pub async fn dump(&self, assembly: &Path, metadata: &Path, out_dir: &Path) -> DecompResult<()> {
        self.ensure_batch_mode().await?;

        info!("Running Il2CppDumper on {}", assembly.display());
        debug!(
            "Executing: {} {} {} {}",
            self.exe.display(),
            assembly.display(),
            metadata.display(),
            out_dir.display()
        );

        let status = Command::new(&self.exe)
            .arg(assembly)
            .arg(metadata)
            .arg(out_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| DecompError::command_failed(self.exe.display().to_string(), e))?;

        exit_ok("Il2CppDumper", status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fake_dumper(tools_dir: &Path) -> PathBuf {
        let dir = tools_dir.join("Il2CppDumper");
        std::fs::create_dir_all(&dir).unwrap();
        let exe_path = dir.join(exe("Il2CppDumper"));
        std::fs::write(&exe_path, "").unwrap();
        exe_path
    }

    #[test]
    fn locate_under_tools_dir() {
        let temp = TempDir::new().unwrap();
        fake_dumper(temp.path());

        let dumper = Dumper::locate(&ToolsConfig::default(), temp.path()).unwrap();
        assert!(dumper.dir().ends_with("Il2CppDumper"));
    }

    #[test]
    fn locate_explicit_path() {
        let temp = TempDir::new().unwrap();
        let exe_path = fake_dumper(temp.path());

        let config = ToolsConfig {
            dumper: Some(exe_path.clone()),
            ..Default::default()
        };
        let dumper = Dumper::locate(&config, Path::new("/unused")).unwrap();
        assert_eq!(dumper.exe_path(), exe_path);
    }

    #[test]
    fn locate_missing_errors() {
        let temp = TempDir::new().unwrap();
        let err = Dumper::locate(&ToolsConfig::default(), temp.path()).unwrap_err();
        assert!(matches!(err, DecompError::DumperNotFound { .. }));
    }

    #[test]
    fn header_script_missing_errors() {
        let temp = TempDir::new().unwrap();
        fake_dumper(temp.path());
        let dumper = Dumper::locate(&ToolsConfig::default(), temp.path()).unwrap();

        let err = dumper.header_script().unwrap_err();
        assert!(matches!(err, DecompError::HeaderScriptNotFound { .. }));
    }

    #[tokio::test]
    async fn batch_mode_creates_config() {
        let temp = TempDir::new().unwrap();
        fake_dumper(temp.path());
        let dumper = Dumper::locate(&ToolsConfig::default(), temp.path()).unwrap();

        dumper.ensure_batch_mode().await.unwrap();

        let text = std::fs::read_to_string(dumper.dir().join("config.json")).unwrap();
        let settings: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(settings["RequireAnyKey"], serde_json::json!(false));
    }

    #[tokio::test]
    async fn batch_mode_preserves_other_settings() {
        let temp = TempDir::new().unwrap();
        fake_dumper(temp.path());
        let dumper = Dumper::locate(&ToolsConfig::default(), temp.path()).unwrap();
        std::fs::write(
            dumper.dir().join("config.json"),
            r#"{"RequireAnyKey": true, "DumpProperty": true}"#,
        )
        .unwrap();

        dumper.ensure_batch_mode().await.unwrap();

        let text = std::fs::read_to_string(dumper.dir().join("config.json")).unwrap();
        let settings: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(settings["RequireAnyKey"], serde_json::json!(false));
        assert_eq!(settings["DumpProperty"], serde_json::json!(true));
    }

    #[tokio::test]
    async fn batch_mode_leaves_disabled_config_alone() {
        let temp = TempDir::new().unwrap();
        fake_dumper(temp.path());
        let dumper = Dumper::locate(&ToolsConfig::default(), temp.path()).unwrap();
        let config_path = dumper.dir().join("config.json");
        let original = r#"{"RequireAnyKey": false}"#;
        std::fs::write(&config_path, original).unwrap();

        dumper.ensure_batch_mode().await.unwrap();

        assert_eq!(std::fs::read_to_string(&config_path).unwrap(), original);
    }
}
