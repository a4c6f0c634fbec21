//! List command - show cached workspaces

use crate::cli::args::{ListArgs, OutputFormat};
use crate::config::Config;
use crate::error::DecompResult;
use crate::ui::{self, UiContext};
use crate::workspace::store::{format_bytes, WorkspaceProgress};
use crate::workspace::{WorkspaceEntry, WorkspaceStore};
use console::style;

/// Execute the list command
pub async fn execute(args: ListArgs, config: &Config) -> DecompResult<()> {
    let store = WorkspaceStore::new(&config.workspace.root);
    let entries = store.list()?;

    if entries.is_empty() {
        match args.format {
            OutputFormat::Json => println!("[]"),
            OutputFormat::Plain => {}
            OutputFormat::Table => {
                let ctx = UiContext::detect();
                ui::step_info(&ctx, "No cached workspaces");
            }
        }
        return Ok(());
    }

    match args.format {
        OutputFormat::Table => print_table(&entries),
        OutputFormat::Json => print_json(&entries)?,
        OutputFormat::Plain => print_plain(&entries),
    }

    Ok(())
}

fn print_table(entries: &[WorkspaceEntry]) {
    let ctx = UiContext::detect();
    ui::intro(&ctx, "Workspaces");

    println!(
        "{:<10} {:<10} {:<10} {:<17} {:<30}",
        style("ID").bold(),
        style("PROGRESS").bold(),
        style("SIZE").bold(),
        style("MODIFIED").bold(),
        style("PROJECT").bold()
    );
    println!("{}", "-".repeat(77));

    for entry in entries {
        let progress_styled = match entry.progress {
            WorkspaceProgress::Analyzed => style("analyzed").green(),
            WorkspaceProgress::Headered => style("headered").cyan(),
            WorkspaceProgress::Dumped => style("dumped").cyan(),
            WorkspaceProgress::Staged => style("staged").yellow(),
            WorkspaceProgress::Empty => style("empty").dim(),
        };

        let modified = entry.modified_at.format("%Y-%m-%d %H:%M").to_string();
        let project = entry.project.as_deref().unwrap_or("-");

        println!(
            "{:<10} {:<10} {:<10} {:<17} {:<30}",
            entry.id,
            progress_styled,
            format_bytes(entry.size_bytes),
            modified,
            project
        );
    }

    println!();
    println!("{} workspace(s)", entries.len());
}

fn print_json(entries: &[WorkspaceEntry]) -> DecompResult<()> {
    let json = serde_json::to_string_pretty(entries)?;
    println!("{}", json);
    Ok(())
}

fn print_plain(entries: &[WorkspaceEntry]) {
    for entry in entries {
        println!("{}", entry.id);
    }
}
