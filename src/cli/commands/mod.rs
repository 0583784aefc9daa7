//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Commands that act on a stack
//! receive a [`StackContext`] holding the loaded descriptor.

pub mod build;
pub mod completions;
pub mod config;
pub mod context;
pub mod dispatcher;
pub mod down;
pub mod enter;
pub mod environment;
pub mod expose;
pub mod logs;
pub mod secrets;
pub mod stack;
pub mod up;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
pub use stack::StackContext;

use serde::Serialize;

use crate::error::{Result, StackError};

/// Render a value as JSON indented by four spaces.
pub(crate) fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| StackError::Other(e.into()))?;
    String::from_utf8(out).map_err(|e| StackError::Other(e.into()))
}
