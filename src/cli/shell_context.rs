use std::{io, path::PathBuf};

use chrono::{Datelike, NaiveDate};

use crate::{
    bonds::BondCollection,
    clock::Clock,
    config::Config,
    errors::CliError,
    storage::BondStore,
};

use super::{
    commands,
    core::{CommandError, CommandResult},
    registry::CommandRegistry,
    ui::{
        console::Console,
        dashboard::{self, Layout, YearSummary},
        list_selector::ScrollList,
        navigation::NavKey,
        surface::{Region, Surface},
        view_graph::HasSurface,
    },
};

/// Everything the views and command handlers work on.
pub struct ShellContext {
    pub surface: Box<dyn Surface>,
    pub registry: CommandRegistry<ShellContext>,
    pub bonds: BondCollection,
    pub store: Box<dyn BondStore>,
    pub clock: Box<dyn Clock>,
    pub config: Config,
    pub layout: Layout,
    pub console: Console,
    pub year: i32,
    fatal: Option<io::Error>,
}

impl HasSurface for ShellContext {
    fn surface(&mut self) -> &mut dyn Surface {
        self.surface.as_mut()
    }
}

impl ShellContext {
    pub fn new(
        surface: Box<dyn Surface>,
        store: Box<dyn BondStore>,
        clock: Box<dyn Clock>,
        config: Config,
    ) -> Result<Self, CliError> {
        let (width, height) = surface.size()?;
        let layout = Layout::compute(width, height)?;
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        let year = clock.today().year();

        Ok(Self {
            surface,
            registry,
            bonds: BondCollection::new(config.expiry_policy),
            store,
            clock,
            config,
            layout,
            console: Console::new(layout.console),
            year,
            fatal: None,
        })
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn print(&mut self, message: impl AsRef<str>) {
        self.console.push(message);
    }

    /// Runs one command line, reporting any failure in the console.
    ///
    /// Returns `false` once the input source is gone, which ends the main loop.
    pub fn execute_line(&mut self, line: &str) -> bool {
        let result = match self.registry.resolve(line) {
            Ok(Some(invocation)) => {
                tracing::info!(command = %invocation.name, args = ?invocation.args, "dispatching command");
                invocation.invoke(self)
            }
            Ok(None) => Ok(()),
            Err(err) => Err(err),
        };
        self.settle(result)
    }

    /// Reports `result`; remembers fatal input errors and returns `false` for them.
    pub fn settle(&mut self, result: CommandResult) -> bool {
        match result {
            Ok(()) => true,
            Err(err) if err.is_fatal() => {
                tracing::warn!(error = %err, "input closed");
                if let CommandError::Io(err) = err {
                    self.fatal = Some(err);
                }
                false
            }
            Err(err) => {
                tracing::warn!(error = %err, "command failed");
                self.print(err.to_string());
                true
            }
        }
    }

    /// Fatal input error recorded while the loop was running.
    pub fn take_fatal(&mut self) -> Option<io::Error> {
        self.fatal.take()
    }

    pub fn ask_string(&mut self, question: &str) -> Result<String, CommandError> {
        let max_len = self.config.max_input_len;
        self.console
            .ask_line(self.surface.as_mut(), question, max_len)?
            .ok_or(CommandError::Cancelled)
    }

    pub fn ask_key(&mut self, question: &str) -> Result<NavKey, CommandError> {
        Ok(self.console.ask_key(self.surface.as_mut(), question)?)
    }

    /// Uses the first argument if present, otherwise prompts. An empty answer
    /// falls back to the configured default bond file.
    pub fn file_argument(&mut self, args: &[&str], question: &str) -> Result<PathBuf, CommandError> {
        if let Some(name) = args.first() {
            return Ok(PathBuf::from(name));
        }
        let question = match &self.config.default_bond_file {
            Some(default) => format!("{question} [{default}]"),
            None => question.to_string(),
        };
        let answer = self.ask_string(&question)?;
        let trimmed = answer.trim();
        if !trimmed.is_empty() {
            return Ok(PathBuf::from(trimmed));
        }
        self.config
            .default_bond_file
            .as_ref()
            .map(PathBuf::from)
            .ok_or_else(|| CommandError::InvalidArguments("no file name given".into()))
    }

    pub fn next_year(&mut self) {
        self.year += 1;
    }

    /// Moves back one year, never before the current one.
    pub fn previous_year(&mut self) {
        self.year = (self.year - 1).max(self.today().year());
    }

    pub fn confirm_exit(&mut self) -> Result<bool, CommandError> {
        let key = self.ask_key("Really exit?[y/n]")?;
        Ok(matches!(key, NavKey::Char('y') | NavKey::Char('Y')))
    }

    pub fn bond_lines(&self) -> Vec<String> {
        let format = self.config.date_format.as_str();
        self.bonds
            .records()
            .iter()
            .enumerate()
            .map(|(index, bond)| {
                format!(
                    "{index}. Name:'{}' Coupon remaining:'{}', Near payday:({})",
                    bond.name,
                    bond.coupon_count,
                    bond.near_pay_date.format(format)
                )
            })
            .collect()
    }

    /// Shows the bond list as a modal popup over the graph pane.
    pub fn show_bond_list(&mut self) -> io::Result<()> {
        let lines = self.bond_lines();
        let region = self.layout.graph;
        let page_size = usize::from(region.inner_height());
        ScrollList::new(&lines, page_size)
            .with_title("|Bonds List|")
            .show(self.surface.as_mut(), region)
    }

    /// Draws the graph content plus the side panes and the legend.
    pub fn draw_dashboard(&mut self, region: Region) -> io::Result<()> {
        let summary = YearSummary::compute(&self.bonds, self.year);
        let surface = self.surface.as_mut();
        dashboard::draw_graph(surface, region, &summary)?;
        dashboard::draw_info(surface, self.layout.info, &summary)?;
        self.console.draw(surface)?;
        dashboard::draw_legend(surface, self.layout.legend)
    }
}
