//! Down command implementation.
//!
//! The `stack down` command deletes what `stack up` applied, one generated
//! manifest at a time.

use crate::cli::args::DownArgs;
use crate::components::{component_eligible, select_components};
use crate::error::{Result, StackError};
use crate::invocation::{generated_manifest_path, KubectlDelete};
use crate::schema::latest::ComponentDescription;
use crate::shell::CommandOptions;
use crate::ui::{Prompt, UserInterface};

use super::dispatcher::{Command, CommandResult};
use super::stack::StackContext;

/// The down command implementation.
pub struct DownCommand<'a> {
    stack: &'a StackContext,
    args: DownArgs,
}

impl<'a> DownCommand<'a> {
    /// Create a new down command.
    pub fn new(stack: &'a StackContext, args: DownArgs) -> Self {
        Self { stack, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &DownArgs {
        &self.args
    }

    fn tear_down(&self, component: &ComponentDescription, ui: &mut dyn UserInterface) -> Result<()> {
        for manifest in &component.manifests {
            let generated = generated_manifest_path(&self.stack.paths().relative(manifest));
            let delete = KubectlDelete { file: generated };

            let result = self
                .stack
                .executor()
                .run(&delete.to_string(), &CommandOptions::captured())?;
            if !result.success {
                tracing::debug!("{}", result.stderr.trim());
                return Err(StackError::CommandFailed {
                    command: delete.to_string(),
                    code: result.exit_code,
                });
            }
            if !result.stdout.trim().is_empty() {
                ui.message(result.stdout.trim_end());
            }
        }
        Ok(())
    }
}

impl Command for DownCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let environment = self.stack.require_active_environment()?;
        self.stack.confirm_if_required(
            environment,
            ui,
            Prompt::confirm(
                "down",
                format!("You are about to destroy pods in `{}`", environment.name),
            ),
        )?;

        let components =
            select_components(self.args.components.as_slice(), &self.stack.config().components)?;

        let mut failed = 0;
        for component in components {
            if !component_eligible(component, Some(&environment.name)) {
                continue;
            }

            ui.message(&format!("Tearing down components at {}...", component.name));
            if let Err(e) = self.tear_down(component, ui) {
                tracing::debug!("Teardown of {} failed: {}", component.name, e);
                ui.warning(&format!(
                    "`{}` component failed teardown. You may need to delete it manually.",
                    component.name
                ));
                failed += 1;
            }
        }

        if failed > 0 {
            return Ok(CommandResult::failure(1));
        }
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::stack::tests::fixture;
    use crate::ui::MockUI;

    fn args(components: &[&str]) -> DownArgs {
        DownArgs {
            components: components.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn deletes_generated_manifests() {
        let f = fixture("/stack", Some("minikube"), &[]);
        let mut ui = MockUI::new();

        let result = DownCommand::new(&f.stack, args(&["db"]))
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert_eq!(
            f.executor.commands(),
            vec![
                "kubectl delete -f \"/stack/deployments/db-generated.yaml\"",
                "kubectl delete -f \"/stack/deployments/db-service-generated.yaml\"",
            ]
        );
        assert!(ui.has_message("Tearing down components at db..."));
    }

    #[test]
    fn failure_is_reported_and_teardown_continues() {
        let f = fixture("/stack", Some("minikube"), &[]);
        f.executor.fail_on("app-generated");
        let mut ui = MockUI::new();

        let result = DownCommand::new(&f.stack, args(&[]))
            .execute(&mut ui)
            .unwrap();

        assert!(!result.success);
        assert!(ui.has_warning("`app` component failed teardown"));
        assert!(f.executor.ran("db-generated.yaml"));
        assert!(f.executor.ran("db-service-generated.yaml"));
    }

    #[test]
    fn skips_components_outside_active_environment() {
        let f = fixture("/stack", Some("minikube"), &[]);
        let mut ui = MockUI::new();

        DownCommand::new(&f.stack, args(&[])).execute(&mut ui).unwrap();

        assert!(!f.executor.ran("datadog"));
    }

    #[test]
    fn guarded_environment_asks_first() {
        let f = fixture("/stack", Some("aks-staging"), &[("ENV", "staging")]);
        let mut ui = MockUI::new();
        ui.set_confirm_response("down", true);

        DownCommand::new(&f.stack, args(&["datadog"]))
            .execute(&mut ui)
            .unwrap();

        assert_eq!(ui.prompts_shown(), ["down"]);
        assert!(f.executor.ran("datadog-generated.yaml"));
    }

    #[test]
    fn unanswered_confirmation_fails() {
        let f = fixture("/stack", Some("aks-staging"), &[("ENV", "staging")]);
        let mut ui = MockUI::new();

        let result = DownCommand::new(&f.stack, args(&[])).execute(&mut ui);

        assert!(matches!(result, Err(StackError::ConfirmationRequired { .. })));
        assert!(f.executor.commands().is_empty());
    }
}
