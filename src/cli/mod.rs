pub mod commands;
pub mod core;
pub mod forms;
pub mod keys;
pub mod registry;
mod shell;
pub mod shell_context;
pub mod ui;

pub use self::core::{CommandError, CommandResult};
pub use shell::{build_view_graph, run_cli, run_dashboard, WELCOME};
pub use shell_context::ShellContext;
