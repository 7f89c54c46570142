use crate::bonds::AppendOutcome;
use crate::cli::core::{CommandError, CommandResult};
use crate::cli::forms;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;

pub(crate) fn definitions() -> Vec<CommandEntry<ShellContext>> {
    vec![
        CommandEntry::new("save", "Save bonds to a JSON file", "save [file]", cmd_save),
        CommandEntry::new("load", "Load bonds from a JSON file", "load [file]", cmd_load),
        CommandEntry::new("new", "Create a bond interactively", "new", cmd_new),
        CommandEntry::new("delete", "Delete a bond by index", "delete [index]", cmd_delete),
    ]
}

fn cmd_save(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = context.file_argument(args, "Filename for save:")?;
    context.bonds.save_to(context.store.as_ref(), &path)?;
    let count = context.bonds.len();
    context.print(format!("Saved: {count} bonds"));
    Ok(())
}

fn cmd_load(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = context.file_argument(args, "Filename for load:")?;
    let today = context.today();
    let count = context
        .bonds
        .load_from(context.store.as_ref(), &path, today)?;
    context.print(format!("Loaded: {count} bonds"));
    Ok(())
}

fn cmd_new(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let record = forms::ask_bond(context)?;
    let name = record.name.clone();
    let today = context.today();
    match context.bonds.append(record, today)? {
        AppendOutcome::Added(index) => context.print(format!("Added: {index}. {name}")),
        AppendOutcome::DiscardedExpired => {
            context.print(format!("Skipped: '{name}' has no coupons left"))
        }
    }
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let raw = match args.first() {
        Some(raw) => raw.to_string(),
        None => context.ask_string("Index for delete:")?,
    };
    let index = parse_index(&raw)?;
    let removed = context.bonds.remove_at(index)?;
    context.print(format!("Deleted: {}", removed.name));
    Ok(())
}

fn parse_index(raw: &str) -> Result<usize, CommandError> {
    raw.trim()
        .parse::<usize>()
        .map_err(|_| CommandError::InvalidArguments(format!("'{}' is not a valid index", raw.trim())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_must_be_a_non_negative_integer() {
        assert_eq!(parse_index(" 2 ").unwrap(), 2);
        assert!(matches!(parse_index("-1"), Err(CommandError::InvalidArguments(_))));
        assert!(matches!(parse_index("x"), Err(CommandError::InvalidArguments(_))));
    }
}
