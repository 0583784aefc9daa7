//! Logs command implementation.
//!
//! The `stack logs` command prints the logs of every container in a
//! component's deployment.

use crate::cli::args::LogsArgs;
use crate::components::find_component;
use crate::error::Result;
use crate::invocation::KubectlLogs;
use crate::shell::CommandOptions;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::stack::StackContext;

/// The logs command implementation.
pub struct LogsCommand<'a> {
    stack: &'a StackContext,
    args: LogsArgs,
}

impl<'a> LogsCommand<'a> {
    /// Create a new logs command.
    pub fn new(stack: &'a StackContext, args: LogsArgs) -> Self {
        Self { stack, args }
    }
}

impl Command for LogsCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let component = find_component(&self.stack.config().components, &self.args.component)?;

        let logs = KubectlLogs {
            deployment: component.name.clone(),
            follow: self.args.follow,
        };

        ui.message(&format!("Showing logs for {}", component.name));
        self.stack
            .executor()
            .run_checked(&logs.to_string(), &CommandOptions::default())?;
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::stack::tests::fixture;
    use crate::error::StackError;
    use crate::ui::MockUI;

    #[test]
    fn shows_logs_for_any_component() {
        let f = fixture("/stack", None, &[]);
        let mut ui = MockUI::new();
        let args = LogsArgs {
            component: "db".to_string(),
            follow: true,
        };

        LogsCommand::new(&f.stack, args).execute(&mut ui).unwrap();

        assert_eq!(
            f.executor.commands(),
            vec!["kubectl logs --all-containers=true -f deployment/db"]
        );
    }

    #[test]
    fn unknown_component_is_an_error() {
        let f = fixture("/stack", None, &[]);
        let mut ui = MockUI::new();
        let args = LogsArgs {
            component: "web".to_string(),
            follow: false,
        };

        let result = LogsCommand::new(&f.stack, args).execute(&mut ui);

        assert!(matches!(result, Err(StackError::NotFound { .. })));
        assert!(f.executor.commands().is_empty());
    }
}
