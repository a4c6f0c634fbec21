//! Status command - check toolchain health and configuration

use crate::config::Config;
use crate::error::DecompResult;
use crate::tools::{self, Dumper, Ghidra, Jdk};
use crate::workspace::store::format_bytes;
use crate::workspace::WorkspaceStore;
use console::{style, Emoji};
use std::process::Stdio;
use tokio::process::Command;

static CHECK: Emoji<'_, '_> = Emoji("✓ ", "[OK] ");
static CROSS: Emoji<'_, '_> = Emoji("✗ ", "[FAIL] ");
static WARN: Emoji<'_, '_> = Emoji("⚠ ", "[WARN] ");

/// Execute the status command
pub async fn execute(config: &Config) -> DecompResult<()> {
    println!("{}", style("il2decomp System Status").bold().cyan());
    println!();

    let mut all_ok = true;
    let tools_dir = tools::tools_dir(&config.tools);

    println!("{}", style("Platform:").bold());
    println!(
        "  {} {} ({})",
        CHECK,
        std::env::consts::OS,
        std::env::consts::ARCH
    );

    println!();
    println!("{}", style("Tools directory:").bold());
    if tools_dir.is_dir() {
        println!("  {} {}", CHECK, tools_dir.display());
    } else {
        println!(
            "  {} {} - will be scanned once it exists",
            WARN,
            style(tools_dir.display()).yellow()
        );
    }

    // JDK first; Ghidra cannot run without it
    println!();
    println!("{}", style("JDK:").bold());
    let jdk = match Jdk::locate(&config.tools, &tools_dir) {
        Ok(jdk) => {
            println!(
                "  {} {}",
                CHECK,
                style(jdk.java_home().display()).green()
            );
            Some(jdk)
        }
        Err(e) => {
            print_missing(&e);
            all_ok = false;
            None
        }
    };

    println!();
    println!("{}", style("Il2CppDumper:").bold());
    match Dumper::locate(&config.tools, &tools_dir) {
        Ok(dumper) => {
            println!(
                "  {} {}",
                CHECK,
                style(dumper.exe_path().display()).green()
            );
            match dumper.header_script() {
                Ok(script) => println!("  {} Header script: {}", CHECK, script.display()),
                Err(e) => {
                    print_missing(&e);
                    all_ok = false;
                }
            }
        }
        Err(e) => {
            print_missing(&e);
            all_ok = false;
        }
    }

    println!();
    println!("{}", style("Ghidra:").bold());
    match jdk {
        Some(jdk) => match Ghidra::locate(&config.tools, &tools_dir, jdk) {
            Ok(ghidra) => {
                println!(
                    "  {} {}",
                    CHECK,
                    style(ghidra.launcher().display()).green()
                );
            }
            Err(e) => {
                print_missing(&e);
                all_ok = false;
            }
        },
        None => {
            println!(
                "  {} {} - locate a JDK first",
                WARN,
                style("Not checked").yellow()
            );
        }
    }

    println!();
    println!("{}", style("Python:").bold());
    all_ok &= check_python(&config.tools.python).await;

    println!();
    println!("{}", style("Workspace cache:").bold());
    check_workspaces(config);

    println!();
    if all_ok {
        println!("{}", style("All critical checks passed").green().bold());
    } else {
        println!(
            "{}",
            style("Some checks failed - see above for details")
                .yellow()
                .bold()
        );
    }

    Ok(())
}

fn print_missing(e: &crate::error::DecompError) {
    println!("  {} {}", CROSS, style(e).red());
    if let Some(hint) = e.hint() {
        println!("    {}", style(hint).dim());
    }
}

async fn check_python(python: &str) -> bool {
    let result = Command::new(python)
        .arg("--version")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await;

    match result {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout);
            let first_line = version.lines().next().unwrap_or("unknown");
            println!("  {} {}", CHECK, style(first_line.trim()).green());
            true
        }
        _ => {
            println!(
                "  {} {} - set tools.python in the config",
                CROSS,
                style(format!("{} not found", python)).red()
            );
            false
        }
    }
}

fn check_workspaces(config: &Config) {
    let store = WorkspaceStore::new(&config.workspace.root);
    println!("  {} Root: {}", CHECK, store.root().display());

    match store.list() {
        Ok(entries) => {
            let total: u64 = entries.iter().map(|e| e.size_bytes).sum();
            println!(
                "  {} {} workspace(s), {}",
                CHECK,
                entries.len(),
                format_bytes(total)
            );
        }
        Err(e) => {
            println!("  {} {} - {}", WARN, style("Could not list").yellow(), e);
        }
    }
}
