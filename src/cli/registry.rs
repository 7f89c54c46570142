use std::collections::HashMap;

use shell_words::split;
use strsim::levenshtein;

use crate::cli::core::{CommandError, CommandResult};

const SUGGESTION_DISTANCE: usize = 2;

pub type CommandHandler<C> = fn(&mut C, &[&str]) -> CommandResult;

pub struct CommandEntry<C> {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler<C>,
}

impl<C> CommandEntry<C> {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler<C>,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
        }
    }
}

/// A parsed command line bound to its handler.
pub struct Invocation<C> {
    pub name: String,
    pub args: Vec<String>,
    handler: CommandHandler<C>,
}

impl<C> Invocation<C> {
    pub fn invoke(&self, context: &mut C) -> CommandResult {
        let args: Vec<&str> = self.args.iter().map(String::as_str).collect();
        (self.handler)(context, &args)
    }
}

pub struct CommandRegistry<C> {
    commands: HashMap<&'static str, CommandEntry<C>>,
    order: Vec<&'static str>,
}

impl<C> Default for CommandRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> CommandRegistry<C> {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Inserts `entry`; an existing command with the same name is replaced.
    ///
    /// Names are registered in lower case; lookups fold case.
    pub fn register(&mut self, entry: CommandEntry<C>) {
        let name = entry.name;
        if self.commands.insert(name, entry).is_none() {
            self.order.push(name);
        }
    }

    pub fn exists(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry<C>> {
        self.commands.get(name.to_lowercase().as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().copied()
    }

    /// Closest registered name, if any is within a couple of edits.
    pub fn suggest(&self, name: &str) -> Option<&'static str> {
        self.names()
            .map(|candidate| (levenshtein(name, candidate), candidate))
            .filter(|(distance, _)| *distance <= SUGGESTION_DISTANCE)
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, candidate)| candidate)
    }

    /// Returns a checked error naming `name` when it is not registered.
    pub fn ensure_exists(&self, name: &str) -> Result<(), CommandError> {
        if self.exists(name) {
            Ok(())
        } else {
            Err(CommandError::UnknownCommand {
                name: name.to_string(),
                suggestion: self.suggest(name).map(str::to_string),
            })
        }
    }

    /// Splits `line` into a command and its arguments. Blank lines resolve to `None`.
    ///
    /// Quoted arguments keep their spaces: `load "my bonds.json"`.
    pub fn resolve(&self, line: &str) -> Result<Option<Invocation<C>>, CommandError> {
        let mut tokens = split(line)
            .map_err(|err| CommandError::InvalidArguments(err.to_string()))?
            .into_iter();
        let Some(raw) = tokens.next() else {
            return Ok(None);
        };
        let name = raw.to_lowercase();
        if !self.exists(&name) {
            return Err(CommandError::UnknownCommand {
                suggestion: self.suggest(&name).map(str::to_string),
                name: raw,
            });
        }
        let handler = self.commands[name.as_str()].handler;
        Ok(Some(Invocation {
            name,
            args: tokens.collect(),
            handler,
        }))
    }

    pub fn dispatch(&self, context: &mut C, line: &str) -> CommandResult {
        match self.resolve(line)? {
            Some(invocation) => invocation.invoke(context),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Vec<String>>,
    }

    fn record(ctx: &mut Recorder, args: &[&str]) -> CommandResult {
        ctx.calls.push(args.iter().map(|arg| arg.to_string()).collect());
        Ok(())
    }

    fn fail(_: &mut Recorder, _: &[&str]) -> CommandResult {
        Err(CommandError::InvalidArguments("boom".into()))
    }

    fn registry() -> CommandRegistry<Recorder> {
        let mut registry = CommandRegistry::new();
        registry.register(CommandEntry::new("load", "Load bonds", "load <file>", record));
        registry.register(CommandEntry::new("save", "Save bonds", "save <file>", fail));
        registry
    }

    #[test]
    fn dispatch_splits_name_and_arguments() {
        let registry = registry();
        let mut ctx = Recorder::default();
        registry.dispatch(&mut ctx, "load  bonds.json extra").unwrap();
        assert_eq!(ctx.calls, vec![vec!["bonds.json".to_string(), "extra".to_string()]]);
    }

    #[test]
    fn quoted_arguments_keep_spaces() {
        let registry = registry();
        let mut ctx = Recorder::default();
        registry.dispatch(&mut ctx, r#"load "my bonds.json""#).unwrap();
        assert_eq!(ctx.calls, vec![vec!["my bonds.json".to_string()]]);
        let err = registry.dispatch(&mut ctx, r#"load "open"#).unwrap_err();
        assert!(matches!(err, CommandError::InvalidArguments(_)));
    }

    #[test]
    fn unknown_command_names_the_token() {
        let registry = registry();
        let mut ctx = Recorder::default();
        let err = registry.dispatch(&mut ctx, "lod x").unwrap_err();
        assert_eq!(err.to_string(), "Unknown command: 'lod' (did you mean 'load'?)");
        let err = registry.dispatch(&mut ctx, "frobnicate").unwrap_err();
        assert_eq!(err.to_string(), "Unknown command: 'frobnicate'");
        assert!(ctx.calls.is_empty());
    }

    #[test]
    fn handler_errors_surface_to_the_caller() {
        let registry = registry();
        let mut ctx = Recorder::default();
        let err = registry.dispatch(&mut ctx, "SAVE").unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn blank_lines_do_nothing() {
        let registry = registry();
        let mut ctx = Recorder::default();
        registry.dispatch(&mut ctx, "   ").unwrap();
        assert!(ctx.calls.is_empty());
    }

    #[test]
    fn last_registration_wins_and_keeps_its_slot() {
        let mut registry = registry();
        registry.register(CommandEntry::new("load", "Replaced", "load", fail));
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["load", "save"]);
        assert_eq!(registry.get("load").map(|entry| entry.description), Some("Replaced"));
        let mut ctx = Recorder::default();
        assert!(registry.dispatch(&mut ctx, "load").is_err());
        assert!(registry.exists("save"));
        assert!(!registry.exists("delete"));
    }

    #[test]
    fn lookups_fold_case_like_dispatch() {
        let registry = registry();
        assert!(registry.exists("SAVE"));
        assert!(registry.exists("Load"));
        assert_eq!(registry.get("LOAD").map(|entry| entry.name), Some("load"));
        assert!(registry.ensure_exists("Save").is_ok());
        let mut ctx = Recorder::default();
        registry.dispatch(&mut ctx, "LOAD x").unwrap();
        assert_eq!(ctx.calls, vec![vec!["x".to_string()]]);
    }
}
