//! Command-line interface for stack.
//!
//! This module provides the CLI argument parsing using clap's derive macros
//! and command implementations.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{
    BuildArgs, Cli, Commands, CompletionsArgs, ConfigArgs, ContextArgs, DownArgs, EnterArgs,
    EnvironmentArgs, ExposeArgs, LogsArgs, SecretsAction, SecretsArgs, UpArgs,
};
pub use commands::{Command, CommandDispatcher, CommandResult, StackContext};
