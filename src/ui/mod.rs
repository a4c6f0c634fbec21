//! UI module for consistent CLI output
//!
//! Uses `cliclack` for step-styled output and prompts, with automatic
//! fallback to plain lines when stdout is not a terminal or a CI
//! environment is detected. External tools write straight to the
//! inherited terminal, so every spinner is stopped before one runs.

mod context;
mod output;
mod progress;
mod prompts;

pub use context::UiContext;
pub use output::{
    intro, key_value, note, outro_success, remark, step_info, step_ok, step_ok_detail,
    step_warn_hint,
};
pub use progress::TaskSpinner;
pub use prompts::confirm;
