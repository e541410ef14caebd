//! Line-oriented command shell over a user's session.

pub mod commands;
pub mod context;
pub mod output;
pub mod registry;
mod shell;
pub mod table;

pub use context::{CliError, CliMode, CommandError, ShellContext};
pub use shell::{run_cli, SCRIPT_ENV};
