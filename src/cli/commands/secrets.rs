//! Secrets command implementation.
//!
//! The `stack secrets` command inspects the Kubernetes secrets labelled
//! with the stack name and reports which secrets components expect.

use anyhow::anyhow;
use indexmap::IndexMap;

use crate::cli::args::{SecretsAction, SecretsArgs};
use crate::components::select_components;
use crate::error::{Result, StackError};
use crate::invocation::{KubectlDeleteSecrets, KubectlSecrets};
use crate::shell::CommandOptions;
use crate::ui::{Prompt, UserInterface};

use super::dispatcher::{Command, CommandResult};
use super::render_json;
use super::stack::StackContext;

/// Stock secret types and the secret names they create.
pub const STOCK_SECRETS: &[(&str, &str)] = &[("registry", "acr-service-principal")];

/// The secrets command implementation.
pub struct SecretsCommand<'a> {
    stack: &'a StackContext,
    args: SecretsArgs,
}

impl<'a> SecretsCommand<'a> {
    /// Create a new secrets command.
    pub fn new(stack: &'a StackContext, args: SecretsArgs) -> Self {
        Self { stack, args }
    }

    fn stack_name(&self) -> Result<&str> {
        let name = self.stack.config().stack.name.trim();
        if name.is_empty() {
            return Err(anyhow!("stack.name must be set to label secrets").into());
        }
        Ok(name)
    }

    fn list(&self) -> Result<CommandResult> {
        let list = KubectlSecrets {
            stack_name: self.stack_name()?.to_string(),
        };
        self.stack
            .executor()
            .run_checked(&list.to_string(), &CommandOptions::default())?;
        Ok(CommandResult::success())
    }

    fn ids(&self, components: &[String], ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let selected = select_components(components, &self.stack.config().components)?;
        let ids: IndexMap<&str, &IndexMap<String, String>> = selected
            .iter()
            .map(|c| (c.name.as_str(), &c.required_variables))
            .collect();
        ui.data(&render_json(&ids)?);
        Ok(CommandResult::success())
    }

    fn delete(&self, secret_type: Option<&str>, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let secret_name = match secret_type {
            Some(secret_type) => {
                let (_, name) = STOCK_SECRETS
                    .iter()
                    .find(|(t, _)| *t == secret_type)
                    .ok_or_else(|| StackError::NotFound {
                        kind: "secret type",
                        name: secret_type.to_string(),
                    })?;
                Some(name.to_string())
            }
            None => {
                let prompt = Prompt::confirm(
                    "secrets-delete",
                    "you are about to delete all secrets for the stack",
                );
                if !ui.confirm(&prompt)? {
                    return Err(StackError::Aborted);
                }
                None
            }
        };

        let delete = KubectlDeleteSecrets {
            stack_name: self.stack_name()?.to_string(),
            secret_name,
        };
        self.stack
            .executor()
            .run_checked(&delete.to_string(), &CommandOptions::default())?;
        Ok(CommandResult::success())
    }
}

impl Command for SecretsCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &self.args.action {
            None => self.list(),
            Some(SecretsAction::Ids { components }) => self.ids(components, ui),
            Some(SecretsAction::Delete { secret_type }) => self.delete(secret_type.as_deref(), ui),
        }
    }
}
