use std::io::{self, Write};

use crate::{
    clock::SystemClock,
    config::{Config, ConfigManager},
    errors::CliError,
    storage::JsonBondStore,
};

use super::{
    keys,
    shell_context::ShellContext,
    ui::{
        dashboard::{self, Layout, GRAPH_TITLE, HELP_TITLE},
        navigation::NavKey,
        surface::Surface,
        terminal::TerminalSurface,
        test_mode::ScriptedSurface,
        view_graph::{ViewGraph, ViewNode},
    },
};

pub const WELCOME: &str = "Inited successfully. Type ':help' for info";

pub fn run_cli() -> Result<(), CliError> {
    let config = ConfigManager::new()?.load_or_create()?;

    match ScriptedSurface::from_env() {
        Some(surface) => run_script(surface, config),
        None => {
            let surface = TerminalSurface::enter()?;
            let mut context = build_context(Box::new(surface), config)?;
            run_dashboard(&mut context)
        }
    }
}

/// Runs against a scripted surface and prints the console log once the loop ends.
fn run_script(surface: ScriptedSurface, config: Config) -> Result<(), CliError> {
    let mut context = build_context(Box::new(surface), config)?;
    let result = run_dashboard(&mut context);

    let mut stdout = io::stdout().lock();
    for line in context.console.lines() {
        writeln!(stdout, "{line}")?;
    }
    result
}

fn build_context(surface: Box<dyn Surface>, config: Config) -> Result<ShellContext, CliError> {
    ShellContext::new(
        surface,
        Box::new(JsonBondStore),
        Box::new(SystemClock),
        config,
    )
}

/// Drives the dashboard until the user exits or input runs out.
pub fn run_dashboard(context: &mut ShellContext) -> Result<(), CliError> {
    context.print(WELCOME);
    tracing::info!(year = context.year, "dashboard started");

    let mut graph = build_view_graph(&context.layout);
    graph.run(context)?;

    if let Some(err) = context.take_fatal() {
        return Err(CliError::Io(err));
    }
    tracing::info!("dashboard closed");
    Ok(())
}

/// Main view with its key actions, plus the help view reachable from it.
pub fn build_view_graph(layout: &Layout) -> ViewGraph<ShellContext> {
    let main = ViewNode::new(layout.graph)
        .with_title(GRAPH_TITLE)
        .with_draw(|context: &mut ShellContext, region| context.draw_dashboard(region))
        .on_key(keys::EXIT, request_exit)
        .on_key(NavKey::Interrupt, request_exit)
        .on_key(keys::NEXT_YEAR, |context: &mut ShellContext| {
            context.next_year();
            true
        })
        .on_key(keys::PREV_YEAR, |context: &mut ShellContext| {
            context.previous_year();
            true
        })
        .on_key(keys::APPEND_BOND, |context: &mut ShellContext| {
            context.execute_line("new")
        })
        .on_key(keys::SAVE_BONDS, |context: &mut ShellContext| {
            context.execute_line("save")
        })
        .on_key(keys::LOAD_BONDS, |context: &mut ShellContext| {
            context.execute_line("load")
        })
        .on_key(keys::LIST_BONDS, |context: &mut ShellContext| {
            context.execute_line("list")
        })
        .on_key(keys::START_OF_COMMAND, read_command);

    let mut graph = ViewGraph::new(main);
    let root = graph.root();
    let help = graph.add(
        ViewNode::new(layout.help)
            .with_title(HELP_TITLE)
            .with_draw(|context: &mut ShellContext, region| {
                dashboard::draw_help(context.surface.as_mut(), region)
            })
            .route(keys::EXIT, root)
            .route(NavKey::Esc, root),
    );
    graph.connect(root, keys::HELP, help);
    graph
}

fn request_exit(context: &mut ShellContext) -> bool {
    match context.confirm_exit() {
        Ok(confirmed) => !confirmed,
        Err(err) => context.settle(Err(err)),
    }
}

fn read_command(context: &mut ShellContext) -> bool {
    match context.ask_string(":") {
        Ok(line) => context.execute_line(&line),
        Err(err) => context.settle(Err(err)),
    }
}
