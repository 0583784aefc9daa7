//! Config command implementation.
//!
//! The `stack config` command shows the parsed stack descriptor.

use crate::cli::args::ConfigArgs;
use crate::config::{load_config, ConfigPaths};
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The config command implementation.
pub struct ConfigCommand {
    paths: ConfigPaths,
    args: ConfigArgs,
}

impl ConfigCommand {
    /// Create a new config command.
    pub fn new(paths: ConfigPaths, args: ConfigArgs) -> Self {
        Self { paths, args }
    }

    /// Get the descriptor search paths.
    pub fn paths(&self) -> &ConfigPaths {
        &self.paths
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ConfigArgs {
        &self.args
    }
}

impl Command for ConfigCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let path = self.paths.resolve()?;
        let config = load_config(&self.paths, !self.args.no_upgrade)?;

        ui.message(&format!("# {} ({})", path.display(), config.version()));

        if self.args.json {
            ui.data(&config.to_json()?);
        } else {
            ui.data(&config.to_yaml()?);
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StackError;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    const OLD_DESCRIPTOR: &str = r#"
stack:
  name: platform
components:
  - name: app
    requiredVariables: [RSA_KEY]
"#;

    fn setup_stack(file: &str, descriptor: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(file), descriptor).unwrap();
        temp
    }

    #[test]
    fn config_no_descriptor() {
        let temp = TempDir::new().unwrap();
        let cmd = ConfigCommand::new(ConfigPaths::new(temp.path(), None), ConfigArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui);

        assert!(matches!(result, Err(StackError::ConfigNotFound { .. })));
    }

    #[test]
    fn config_upgrades_by_default() {
        let temp = setup_stack(".stack.yml", OLD_DESCRIPTOR);
        let cmd = ConfigCommand::new(ConfigPaths::new(temp.path(), None), ConfigArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_message(".stack.yml (stack/v1alpha2)"));
        assert!(ui.has_data("apiVersion: stack/v1alpha2"));
        assert!(ui.has_data("RSA_KEY: ''"));
    }

    #[test]
    fn config_without_upgrade_keeps_version() {
        let temp = setup_stack(".stack.yml", OLD_DESCRIPTOR);
        let args = ConfigArgs {
            no_upgrade: true,
            ..Default::default()
        };
        let cmd = ConfigCommand::new(ConfigPaths::new(temp.path(), None), args);
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        assert!(ui.has_message("(stack/v0beta1)"));
        assert!(ui.has_data("- RSA_KEY"));
    }

    #[test]
    fn config_json_output() {
        let temp = setup_stack("custom.yaml", OLD_DESCRIPTOR);
        let args = ConfigArgs {
            json: true,
            ..Default::default()
        };
        let cmd = ConfigCommand::new(
            ConfigPaths::new(temp.path(), Some("custom.yaml".to_string())),
            args,
        );
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        assert!(ui.has_data("\"apiVersion\": \"stack/v1alpha2\""));
    }

    #[test]
    fn config_prefers_local_descriptor() {
        let temp = setup_stack(".stack.yaml", "stack:\n  name: shared\n");
        fs::write(temp.path().join(".stack-local.yaml"), "stack:\n  name: mine\n").unwrap();
        let cmd = ConfigCommand::new(ConfigPaths::new(temp.path(), None), ConfigArgs::default());
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        assert!(ui.has_data("name: mine"));
    }
}
