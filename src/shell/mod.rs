//! Shell command execution.

pub mod command;
pub mod executor;
pub mod platform;

pub use command::{
    execute, execute_checked, execute_quiet, CommandOptions, CommandResult,
};
pub use executor::{Executor, RecordingExecutor, SystemExecutor};
pub use platform::{is_ci, is_ci_with_env};
