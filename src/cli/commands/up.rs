//! Up command implementation.
//!
//! The `stack up` command renders each component's manifests with kubetpl
//! and applies the result with kubectl.

use std::fs;

use crate::cli::args::UpArgs;
use crate::components::{component_eligible, generate_envs, select_components};
use crate::error::Result;
use crate::invocation::{generated_manifest_path, KubectlApply, KubetplRender};
use crate::schema::latest::ComponentDescription;
use crate::shell::CommandOptions;
use crate::ui::{Prompt, UserInterface};

use super::dispatcher::{Command, CommandResult};
use super::stack::StackContext;

/// The up command implementation.
pub struct UpCommand<'a> {
    stack: &'a StackContext,
    args: UpArgs,
}

impl<'a> UpCommand<'a> {
    /// Create a new up command.
    pub fn new(stack: &'a StackContext, args: UpArgs) -> Self {
        Self { stack, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &UpArgs {
        &self.args
    }

    fn bring_up(&self, component: &ComponentDescription) -> Result<()> {
        let paths = self.stack.paths();
        let executor = self.stack.executor();

        let env = generate_envs(component.required_variable_names(), |key| {
            self.stack.lookup(key)
        })?;
        let template_config: Vec<_> = component
            .template_config
            .iter()
            .map(|file| paths.relative(file))
            .collect();

        for manifest in &component.manifests {
            let manifest = paths.relative(manifest);
            let render = KubetplRender {
                manifest: manifest.clone(),
                template_config: template_config.clone(),
                env: env.clone(),
            };
            let options = CommandOptions {
                capture_stdout: true,
                ..Default::default()
            }
            .shown_as(render.redacted());
            let rendered = executor.run_checked(&render.to_string(), &options)?;

            let generated = generated_manifest_path(&manifest);
            fs::write(&generated, rendered.stdout)?;
            tracing::debug!("Rendered {} to {}", manifest.display(), generated.display());

            let apply = KubectlApply { file: generated };
            executor.run_checked(&apply.to_string(), &CommandOptions::default())?;
        }
        Ok(())
    }
}

impl Command for UpCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let environment = self.stack.require_active_environment()?;
        self.stack.confirm_if_required(
            environment,
            ui,
            Prompt::confirm(
                "up",
                format!("You are about to deploy components to `{}`", environment.name),
            ),
        )?;

        let components =
            select_components(self.args.components.as_slice(), &self.stack.config().components)?;

        for component in components {
            if !component_eligible(component, Some(&environment.name)) {
                ui.warning(&format!(
                    "skipping component `{}`: not in active environment",
                    component.name
                ));
                continue;
            }

            ui.message(&format!("Bringing up component {}...", component.name));
            self.bring_up(component)?;
            ui.success(&format!("{} is up", component.name));
        }

        Ok(CommandResult::success())
    }
}
