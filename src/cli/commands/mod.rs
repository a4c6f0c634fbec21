//! CLI command implementations

pub mod clean;
pub mod completions;
pub mod config;
pub mod list;
pub mod open;
pub mod run;
pub mod status;

pub use clean::execute as clean;
pub use completions::execute as completions;
pub use config::execute as config;
pub use list::execute as list;
pub use open::execute as open;
pub use run::execute as run;
pub use status::execute as status;
