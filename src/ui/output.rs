//! Step-styled output with a plain fallback
//!
//! Fancy mode renders through cliclack's session log. Plain mode writes
//! tagged, unstyled lines that read cleanly in CI logs and redirected
//! output. Callers never branch on the context themselves.

use super::context::UiContext;
use console::style;

fn plain(tag: &str, message: &str) {
    println!("[{tag}] {message}");
}

/// Session header, opens the cliclack gutter in fancy mode
pub fn intro(ctx: &UiContext, title: &str) {
    if ctx.use_fancy_output() {
        cliclack::intro(style(title).cyan().bold()).ok();
    } else {
        println!("{title}");
    }
}

/// Session footer for the success path
pub fn outro_success(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::outro(style(message).green().bold()).ok();
    } else {
        plain("ok", message);
    }
}

/// Completed step
pub fn step_ok(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::success(message).ok();
    } else {
        plain("ok", message);
    }
}

/// Completed step with a dimmed detail, usually a path
pub fn step_ok_detail(ctx: &UiContext, message: &str, detail: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::success(format!("{} ({})", message, style(detail).dim())).ok();
    } else {
        plain("ok", &format!("{message} ({detail})"));
    }
}

/// Neutral step, used for skipped stages and reused outputs
pub fn step_info(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::info(message).ok();
    } else {
        plain("info", message);
    }
}

/// Warning step carrying the action that clears it
pub fn step_warn_hint(ctx: &UiContext, message: &str, hint: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::warning(format!("{} - {}", message, style(hint).dim())).ok();
    } else {
        plain("warn", &format!("{message} - {hint}"));
    }
}

/// Boxed multi-line summary (workspace outputs at the end of a run)
pub fn note(ctx: &UiContext, title: &str, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::note(title, message).ok();
    } else {
        println!("{title}:");
        for line in message.lines() {
            println!("  {line}");
        }
    }
}

/// Dimmed aside, no tag
pub fn remark(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::remark(message).ok();
    } else {
        println!("{message}");
    }
}

/// Indented key-value line under the preceding step
pub fn key_value(ctx: &UiContext, key: &str, value: &str) {
    if ctx.use_fancy_output() {
        println!("  {}: {value}", style(key).dim());
    } else {
        println!("  {key}: {value}");
    }
}
