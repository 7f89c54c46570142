//! Command errors shared by the registry and the command handlers.

use std::{fmt, io};

use thiserror::Error;

use crate::errors::BondError;

pub type CommandResult = Result<(), CommandError>;

/// Recoverable failure of a single command; shown in the console pane.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Unknown command: '{name}'{}", Suggestion(.suggestion.as_deref()))]
    UnknownCommand {
        name: String,
        suggestion: Option<String>,
    },
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Core(#[from] BondError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Input cancelled")]
    Cancelled,
}

impl CommandError {
    /// Errors that mean the input itself is gone and the dashboard cannot continue.
    pub fn is_fatal(&self) -> bool {
        matches!(self, CommandError::Io(err) if err.kind() == io::ErrorKind::UnexpectedEof)
    }
}

struct Suggestion<'a>(Option<&'a str>);

impl fmt::Display for Suggestion<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(name) => write!(f, " (did you mean '{name}'?)"),
            None => Ok(()),
        }
    }
}
