//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use crate::cli::args::{Cli, Commands};
use crate::config::ConfigPaths;
use crate::environment::KubectlContext;
use crate::error::Result;
use crate::shell::SystemExecutor;
use crate::ui::UserInterface;

use super::build::BuildCommand;
use super::completions::CompletionsCommand;
use super::config::ConfigCommand;
use super::context::ContextCommand;
use super::down::DownCommand;
use super::enter::EnterCommand;
use super::environment::EnvironmentCommand;
use super::expose::ExposeCommand;
use super::logs::LogsCommand;
use super::secrets::SecretsCommand;
use super::stack::StackContext;
use super::up::UpCommand;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output and prompts
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    paths: ConfigPaths,
}

impl CommandDispatcher {
    /// Create a new dispatcher reading the descriptor from `paths`.
    pub fn new(paths: ConfigPaths) -> Self {
        Self { paths }
    }

    /// Create a dispatcher from the global CLI options.
    pub fn from_cli(cli: &Cli) -> Self {
        Self::new(ConfigPaths::new(
            cli.stack_directory.clone(),
            cli.stack_config_file.clone(),
        ))
    }

    /// Get the descriptor search paths.
    pub fn paths(&self) -> &ConfigPaths {
        &self.paths
    }

    /// Dispatch and execute a command.
    ///
    /// The descriptor is only loaded for commands that act on the stack, so
    /// `context`, `enter` and `completions` work anywhere.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let load = || StackContext::load(self.paths.clone());

        match &cli.command {
            Commands::Build(args) => BuildCommand::new(&load()?, args.clone()).execute(ui),
            Commands::Up(args) => UpCommand::new(&load()?, args.clone()).execute(ui),
            Commands::Down(args) => DownCommand::new(&load()?, args.clone()).execute(ui),
            Commands::Expose(args) => ExposeCommand::new(&load()?, args.clone()).execute(ui),
            Commands::Logs(args) => LogsCommand::new(&load()?, args.clone()).execute(ui),
            Commands::Environment(args) => {
                EnvironmentCommand::new(&load()?, args.clone()).execute(ui)
            }
            Commands::Secrets(args) => SecretsCommand::new(&load()?, args.clone()).execute(ui),
            Commands::Config(args) => {
                ConfigCommand::new(self.paths.clone(), args.clone()).execute(ui)
            }
            Commands::Context(args) => {
                let contexts = KubectlContext::new();
                ContextCommand::new(&contexts, &SystemExecutor, args.clone()).execute(ui)
            }
            Commands::Enter(args) => {
                EnterCommand::new(&SystemExecutor, args.clone()).execute(ui)
            }
            Commands::Completions(args) => CompletionsCommand::new(args.clone()).execute(ui),
        }
    }
}
