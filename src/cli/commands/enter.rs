//! Enter command implementation.
//!
//! The `stack enter` command opens an interactive shell in the single pod
//! labelled `app=<app>`. It works without a stack descriptor.

use anyhow::anyhow;

use crate::cli::args::EnterArgs;
use crate::error::{Result, StackError};
use crate::invocation::{KubectlExec, KubectlGetPods, KubectlPodContainers};
use crate::shell::{CommandOptions, Executor};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The enter command implementation.
pub struct EnterCommand<'a> {
    executor: &'a dyn Executor,
    args: EnterArgs,
}

impl<'a> EnterCommand<'a> {
    /// Create a new enter command.
    pub fn new(executor: &'a dyn Executor, args: EnterArgs) -> Self {
        Self { executor, args }
    }

    fn namespace(&self) -> Option<String> {
        self.args.namespace.clone()
    }

    fn query(&self, command: &str) -> Result<Vec<String>> {
        let result = self
            .executor
            .run_checked(command, &CommandOptions::captured())?;
        Ok(result.stdout.split_whitespace().map(String::from).collect())
    }

    fn find_pod(&self) -> Result<String> {
        let lookup = KubectlGetPods {
            app: self.args.app.clone(),
            namespace: self.namespace(),
        };
        let mut pods = self.query(&lookup.to_string())?;

        match pods.len() {
            0 => Err(StackError::NotFound {
                kind: "pod",
                name: format!("app={}", self.args.app),
            }),
            1 => Ok(pods.remove(0)),
            _ => Err(anyhow!(
                "multiple pods match app={}: {}",
                self.args.app,
                pods.join(", ")
            )
            .into()),
        }
    }

    /// The container to enter. Pods with several containers need one named.
    fn find_container(&self, pod: &str) -> Result<Option<String>> {
        let lookup = KubectlPodContainers {
            pod: pod.to_string(),
            namespace: self.namespace(),
        };
        let containers = self.query(&lookup.to_string())?;

        match self.args.container.as_deref() {
            Some(wanted) if containers.iter().any(|c| c == wanted) => {
                Ok(Some(wanted.to_string()))
            }
            Some(wanted) => Err(StackError::NotFound {
                kind: "container",
                name: wanted.to_string(),
            }),
            None if containers.len() > 1 => Err(anyhow!(
                "pod {} has multiple containers: {}. Name one as an extra argument",
                pod,
                containers.join(", ")
            )
            .into()),
            None => Ok(containers.into_iter().next()),
        }
    }

    fn find_shell(
        &self,
        pod: &str,
        container: Option<&str>,
        ui: &mut dyn UserInterface,
    ) -> Result<String> {
        if let Some(shell) = self.args.shell.as_deref().filter(|s| !s.is_empty()) {
            return Ok(shell.to_string());
        }

        let list_shells = KubectlExec {
            pod: pod.to_string(),
            container: container.map(String::from),
            namespace: self.namespace(),
            command: "cat /etc/shells".to_string(),
            interactive: false,
        };
        let shells: Vec<String> = self
            .query(&list_shells.to_string())?
            .into_iter()
            .filter(|line| line.starts_with('/'))
            .collect();

        let first = shells
            .first()
            .cloned()
            .ok_or_else(|| anyhow!("could not locate any available shells in pod {}", pod))?;
        ui.message(&format!(
            "available shells: {}: using first available: {}",
            shells.join(", "),
            first
        ));
        Ok(first)
    }
}

impl Command for EnterCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let pod = self.find_pod()?;
        let container = self.find_container(&pod)?;
        let shell = self.find_shell(&pod, container.as_deref(), ui)?;

        let exec = KubectlExec {
            pod,
            container,
            namespace: self.namespace(),
            command: shell,
            interactive: true,
        };
        self.executor
            .run_checked(&exec.to_string(), &CommandOptions::default())?;
        Ok(CommandResult::success())
    }
}
