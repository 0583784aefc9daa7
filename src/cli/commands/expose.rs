//! Expose command implementation.
//!
//! The `stack expose` command port-forwards a component's deployment to
//! the local machine and blocks until kubectl exits.

use crate::cli::args::ExposeArgs;
use crate::components::find_component;
use crate::error::{Result, StackError};
use crate::invocation::KubectlPortForward;
use crate::shell::CommandOptions;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::stack::StackContext;

/// The expose command implementation.
pub struct ExposeCommand<'a> {
    stack: &'a StackContext,
    args: ExposeArgs,
}

impl<'a> ExposeCommand<'a> {
    /// Create a new expose command.
    pub fn new(stack: &'a StackContext, args: ExposeArgs) -> Self {
        Self { stack, args }
    }
}

impl Command for ExposeCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let component = find_component(&self.stack.config().components, &self.args.component)?;
        if !component.exposable {
            return Err(StackError::NotExposable {
                name: component.name.clone(),
            });
        }

        let forward = KubectlPortForward {
            deployment: component.name.clone(),
            local_port: self.args.local_port,
            remote_port: self.args.remote_port,
        };

        ui.message(&format!(
            "Exposing {} on localhost:{}",
            component.name, self.args.local_port
        ));
        self.stack
            .executor()
            .run_checked(&forward.to_string(), &CommandOptions::default())?;
        Ok(CommandResult::success())
    }
}
