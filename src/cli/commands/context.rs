//! Context command implementation.
//!
//! The `stack context` command prints, lists or switches the kubectl
//! context. It works without a stack descriptor.

use anyhow::anyhow;

use crate::cli::args::ContextArgs;
use crate::environment::ContextProvider;
use crate::error::Result;
use crate::invocation::KUBECTL_GET_CONTEXTS;
use crate::shell::{CommandOptions, Executor};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The context command implementation.
pub struct ContextCommand<'a> {
    contexts: &'a dyn ContextProvider,
    executor: &'a dyn Executor,
    args: ContextArgs,
}

impl<'a> ContextCommand<'a> {
    /// Create a new context command.
    pub fn new(
        contexts: &'a dyn ContextProvider,
        executor: &'a dyn Executor,
        args: ContextArgs,
    ) -> Self {
        Self {
            contexts,
            executor,
            args,
        }
    }
}

impl Command for ContextCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if self.args.list {
            self.executor
                .run_checked(KUBECTL_GET_CONTEXTS, &CommandOptions::default())?;
            return Ok(CommandResult::success());
        }

        match self.args.target.as_deref() {
            Some(target) => {
                self.contexts.activate_context(target)?;
                ui.success(&format!("Switched to context \"{}\".", target));
            }
            None => {
                let current = self
                    .contexts
                    .current_context()
                    .ok_or_else(|| anyhow!("no context was returned"))?;
                ui.data(&current);
            }
        }
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::FixedContext;
    use crate::error::StackError;
    use crate::shell::RecordingExecutor;
    use crate::ui::MockUI;

    #[test]
    fn prints_current_context() {
        let contexts = FixedContext::new("minikube");
        let executor = RecordingExecutor::new();
        let mut ui = MockUI::new();

        ContextCommand::new(&contexts, &executor, ContextArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert_eq!(ui.data_output(), ["minikube"]);
    }

    #[test]
    fn missing_context_is_an_error() {
        let contexts = FixedContext::none();
        let executor = RecordingExecutor::new();
        let mut ui = MockUI::new();

        let result =
            ContextCommand::new(&contexts, &executor, ContextArgs::default()).execute(&mut ui);

        assert!(matches!(result, Err(StackError::Other(ref e)) if e.to_string() == "no context was returned"));
    }

    #[test]
    fn switches_to_target() {
        let contexts = FixedContext::new("minikube");
        let executor = RecordingExecutor::new();
        let mut ui = MockUI::new();
        let args = ContextArgs {
            target: Some("aks-staging".to_string()),
            list: false,
        };

        ContextCommand::new(&contexts, &executor, args)
            .execute(&mut ui)
            .unwrap();

        assert_eq!(contexts.activations(), vec!["aks-staging"]);
        assert_eq!(contexts.current_context().as_deref(), Some("aks-staging"));
    }

    #[test]
    fn lists_contexts_with_kubectl() {
        let contexts = FixedContext::none();
        let executor = RecordingExecutor::new();
        let mut ui = MockUI::new();
        let args = ContextArgs {
            target: None,
            list: true,
        };

        ContextCommand::new(&contexts, &executor, args)
            .execute(&mut ui)
            .unwrap();

        assert_eq!(executor.commands(), vec!["kubectl config get-contexts"]);
    }
}
