//! Environment command implementation.
//!
//! The `stack environment` command shows which configured environment is
//! active, lists them all, or switches to one by activating its context.

use crate::cli::args::EnvironmentArgs;
use crate::environment::{switch_to, SwitchOutcome};
use crate::error::{Result, StackError};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::render_json;
use super::stack::StackContext;

/// The environment command implementation.
pub struct EnvironmentCommand<'a> {
    stack: &'a StackContext,
    args: EnvironmentArgs,
}

impl<'a> EnvironmentCommand<'a> {
    /// Create a new environment command.
    pub fn new(stack: &'a StackContext, args: EnvironmentArgs) -> Self {
        Self { stack, args }
    }

    fn show_active(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match self.stack.active_environment()? {
            Some(environment) => {
                ui.data(&format!(
                    "Current stack environment \"{}\". \nEnvironmentDescription:",
                    environment.name
                ));
                ui.data(&render_json(environment)?);
            }
            None => ui.message("No environment currently active."),
        }
        Ok(CommandResult::success())
    }

    fn switch(&self, target: &str, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let outcome = switch_to(
            &self.stack.config().environments,
            target,
            self.stack.contexts(),
            |key| self.stack.lookup(key),
        )?;

        match outcome {
            SwitchOutcome::Switched { environment, .. } => {
                ui.success(&format!("Switched to environment \"{}\".", environment.name));
            }
            SwitchOutcome::NeedsExport { key, value, .. } => {
                ui.warning(&format!(
                    "Target environment requires parent process environment variables to be set. \
                     Run the following in your terminal:\n\t$ export {}={}",
                    key, value
                ));
            }
        }
        Ok(CommandResult::success())
    }
}

impl Command for EnvironmentCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let environments = &self.stack.config().environments;
        if environments.is_empty() {
            return Err(StackError::NoEnvironments);
        }
        self.stack.validate_environments()?;

        if self.args.list {
            ui.data(&render_json(environments)?);
            return Ok(CommandResult::success());
        }

        match self.args.target.as_deref() {
            Some(target) => self.switch(target, ui),
            None => self.show_active(ui),
        }
    }
}
