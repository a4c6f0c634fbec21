//! Confirmation prompt with non-interactive fallbacks
//!
//! `--yes` auto-approves, piped or CI stdio resolves to the caller's
//! default, and only a real terminal ever blocks on input.

use super::context::UiContext;
use crate::error::{DecompError, DecompResult};

pub async fn confirm(ctx: &UiContext, message: &str, default: bool) -> DecompResult<bool> {
    if ctx.auto_yes() {
        println!("  {message} (approved by --yes)");
        return Ok(true);
    }
    if !ctx.is_interactive() {
        return Ok(default);
    }

    // cliclack prompts block on stdin, so keep them off the runtime threads
    let message = message.to_string();
    tokio::task::spawn_blocking(move || {
        cliclack::confirm(&message)
            .initial_value(default)
            .interact()
    })
    .await
    .map_err(|e| DecompError::Internal(format!("prompt task panicked: {e}")))?
    .map_err(|e| DecompError::User(format!("Prompt failed: {e}")))
}
