//! Build command implementation.
//!
//! The `stack build` command builds the container images of one or all
//! components with docker.

use crate::cli::args::BuildArgs;
use crate::components::{component_eligible, select_components, select_containers};
use crate::error::Result;
use crate::invocation::{image_reference, DockerBuild};
use crate::shell::CommandOptions;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::stack::StackContext;

/// The build command implementation.
pub struct BuildCommand<'a> {
    stack: &'a StackContext,
    args: BuildArgs,
}

impl<'a> BuildCommand<'a> {
    /// Create a new build command.
    pub fn new(stack: &'a StackContext, args: BuildArgs) -> Self {
        Self { stack, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &BuildArgs {
        &self.args
    }

    fn requested(&self) -> Vec<&str> {
        self.args.component.as_deref().into_iter().collect()
    }
}

impl Command for BuildCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = self.stack.config();
        let paths = self.stack.paths();

        // Build agents have no cluster context, only the env predicate counts.
        let active = self.stack.build_environment()?.map(|e| e.name.as_str());
        let components = select_components(&self.requested(), &config.components)?;

        let mut built = 0;
        for component in components {
            if !component_eligible(component, active) {
                ui.warning(&format!(
                    "skipping build for component `{}`: not in active environment",
                    component.name
                ));
                continue;
            }

            for container in select_containers(component, active, self.args.image.as_deref()) {
                let build = DockerBuild {
                    dockerfile: paths.relative(&container.dockerfile),
                    context: paths.relative(&container.context),
                    tag: image_reference(
                        &container.image,
                        self.args.tag.as_deref(),
                        self.args.image_tag.as_deref(),
                    ),
                    no_cache: self.args.no_cache,
                };

                ui.message(&format!("Building image {}...", build.tag));
                self.stack
                    .executor()
                    .run_checked(&build.to_string(), &CommandOptions::default())?;
                ui.success(&format!("Built {}", build.tag));
                built += 1;
            }
        }

        if built == 0 {
            ui.warning("No images were built");
        }
        Ok(CommandResult::success())
    }
}
