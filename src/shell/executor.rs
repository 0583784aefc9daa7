//! Pluggable command execution.
//!
//! Commands hand their synthesized invocations to an [`Executor`] instead of
//! spawning processes themselves, so a test can swap in a
//! [`RecordingExecutor`] and assert on what would have run.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use super::command::{execute, CommandOptions, CommandResult};
use crate::error::{Result, StackError};

/// Runs shell command strings.
pub trait Executor {
    /// Run `command` and report how it went.
    ///
    /// A non-zero exit is returned as an unsuccessful [`CommandResult`],
    /// not as an error.
    fn run(&self, command: &str, options: &CommandOptions) -> Result<CommandResult>;

    /// Run `command`, turning a non-zero exit into `CommandFailed`.
    fn run_checked(&self, command: &str, options: &CommandOptions) -> Result<CommandResult> {
        let result = self.run(command, options)?;
        if result.success {
            Ok(result)
        } else {
            Err(StackError::CommandFailed {
                command: options.display(command).to_string(),
                code: result.exit_code,
            })
        }
    }
}

/// Executor that spawns real processes through the system shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn run(&self, command: &str, options: &CommandOptions) -> Result<CommandResult> {
        tracing::debug!("Running: {}", options.display(command));
        execute(command, options)
    }
}

/// Executor that records commands instead of running them.
///
/// Clones share the same log, so a test can keep one handle while the code
/// under test owns another.
#[derive(Debug, Clone, Default)]
pub struct RecordingExecutor {
    log: Rc<RefCell<Vec<String>>>,
    failing: Rc<RefCell<Vec<String>>>,
    responses: Rc<RefCell<Vec<(String, String)>>>,
    stdout: Rc<RefCell<String>>,
}

impl RecordingExecutor {
    /// Create an executor where every command succeeds with empty output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every command containing `fragment` exit with status 1.
    pub fn fail_on(&self, fragment: &str) {
        self.failing.borrow_mut().push(fragment.to_string());
    }

    /// Stdout returned by commands containing `fragment`. The first matching
    /// response wins; other commands get the [`set_stdout`](Self::set_stdout) value.
    pub fn respond(&self, fragment: &str, stdout: &str) {
        self.responses
            .borrow_mut()
            .push((fragment.to_string(), stdout.to_string()));
    }

    /// Stdout returned by every successful command.
    pub fn set_stdout(&self, stdout: &str) {
        *self.stdout.borrow_mut() = stdout.to_string();
    }

    /// Every command run so far, oldest first.
    pub fn commands(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    /// Check if a command containing `fragment` was run.
    pub fn ran(&self, fragment: &str) -> bool {
        self.log.borrow().iter().any(|c| c.contains(fragment))
    }
}

impl Executor for RecordingExecutor {
    fn run(&self, command: &str, _options: &CommandOptions) -> Result<CommandResult> {
        self.log.borrow_mut().push(command.to_string());

        if self.failing.borrow().iter().any(|f| command.contains(f.as_str())) {
            return Ok(CommandResult::failure(
                Some(1),
                String::new(),
                format!("{}: simulated failure", command),
                Duration::ZERO,
            ));
        }
        let stdout = self
            .responses
            .borrow()
            .iter()
            .find(|(fragment, _)| command.contains(fragment.as_str()))
            .map(|(_, stdout)| stdout.clone())
            .unwrap_or_else(|| self.stdout.borrow().clone());
        Ok(CommandResult::success(stdout, String::new(), Duration::ZERO))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_executor_runs_commands() {
        let result = SystemExecutor
            .run("echo hello", &CommandOptions::captured())
            .unwrap();
        assert!(result.success);
        assert_eq!(result.stdout.trim(), "hello");
    }

    #[test]
    fn run_checked_fails_on_non_zero_exit() {
        let result = SystemExecutor.run_checked("exit 3", &CommandOptions::captured());
        assert!(matches!(
            result,
            Err(StackError::CommandFailed { code: Some(3), .. })
        ));
    }

    #[test]
    fn recording_executor_shares_log_between_clones() {
        let executor = RecordingExecutor::new();
        let handle = executor.clone();

        executor
            .run("kubectl apply -f app.yaml", &CommandOptions::default())
            .unwrap();

        assert_eq!(handle.commands(), vec!["kubectl apply -f app.yaml"]);
        assert!(handle.ran("apply"));
    }

    #[test]
    fn recording_executor_simulates_failures() {
        let executor = RecordingExecutor::new();
        executor.fail_on("delete");

        let ok = executor.run("kubectl apply", &CommandOptions::default()).unwrap();
        let failed = executor.run("kubectl delete", &CommandOptions::default()).unwrap();

        assert!(ok.success);
        assert!(!failed.success);
        assert!(executor
            .run_checked("kubectl delete", &CommandOptions::default())
            .is_err());
    }

    #[test]
    fn run_checked_reports_display_text() {
        let executor = RecordingExecutor::new();
        executor.fail_on("kubetpl");
        let options = CommandOptions::default().shown_as("kubetpl render -s TOKEN=***");

        let err = executor
            .run_checked("kubetpl render -s TOKEN=\"hunter2\"", &options)
            .unwrap_err();

        assert!(!err.to_string().contains("hunter2"));
        assert!(err.to_string().contains("TOKEN=***"));
        assert_eq!(executor.commands(), vec!["kubetpl render -s TOKEN=\"hunter2\""]);
    }

    #[test]
    fn recording_executor_returns_stdout() {
        let executor = RecordingExecutor::new();
        executor.set_stdout("kind: Deployment\n");

        let result = executor.run("kubetpl render", &CommandOptions::default()).unwrap();
        assert_eq!(result.stdout, "kind: Deployment\n");
    }

    #[test]
    fn recording_executor_scripts_output_per_command() {
        let executor = RecordingExecutor::new();
        executor.set_stdout("fallback");
        executor.respond("get pods", "app-1");

        let pods = executor.run("kubectl get pods -l app=app", &CommandOptions::captured());
        let other = executor.run("kubectl version", &CommandOptions::captured());

        assert_eq!(pods.unwrap().stdout, "app-1");
        assert_eq!(other.unwrap().stdout, "fallback");
    }
}
