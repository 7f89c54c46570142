use crate::cli::core::CommandResult;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;

pub(crate) fn definitions() -> Vec<CommandEntry<ShellContext>> {
    vec![
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new("list", "Show the bonds list", "list", cmd_list),
    ]
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        let name = name.to_lowercase();
        context.registry.ensure_exists(&name)?;
        let line = context
            .registry
            .get(&name)
            .map(|entry| format!("{}: {} (usage: {})", entry.name, entry.description, entry.usage));
        if let Some(line) = line {
            context.print(line);
        }
        return Ok(());
    }

    let names: Vec<&str> = context.registry.names().collect();
    let description = context
        .registry
        .get("help")
        .map_or("", |entry| entry.description);
    let line = format!("{description}: {}", names.join(", "));
    context.print(line);
    Ok(())
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.show_bond_list()?;
    Ok(())
}
