//! Terminal presentation layer: table rendering and the interactive shell

pub mod render;
pub mod shell;

pub use render::{render_pager, render_table, render_view};
pub use shell::{execute, parse_command, run_shell, ShellCommand, HELP};
