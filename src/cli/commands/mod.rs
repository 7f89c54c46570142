pub mod bonds;
pub mod system;

use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::cli::shell_context::ShellContext;

pub(crate) fn all_definitions() -> Vec<CommandEntry<ShellContext>> {
    let mut commands = Vec::new();
    commands.extend(system::definitions());
    commands.extend(bonds::definitions());
    commands
}

/// Registers the built-in command set into `registry`.
pub fn register_all(registry: &mut CommandRegistry<ShellContext>) {
    for entry in all_definitions() {
        registry.register(entry);
    }
}
