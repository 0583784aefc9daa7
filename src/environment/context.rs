//! Kubernetes context access.
//!
//! The resolver only needs to read the current context and switch to a
//! new one. [`KubectlContext`] does both through `kubectl config`;
//! [`FixedContext`] keeps the context in memory for tests.

use std::cell::RefCell;
use std::path::PathBuf;

use crate::error::Result;
use crate::shell::{execute_checked, execute_quiet, CommandOptions};

/// Read and switch the active cluster context.
pub trait ContextProvider {
    /// The currently selected context, if one could be determined.
    fn current_context(&self) -> Option<String>;

    /// Make `name` the current context.
    fn activate_context(&self, name: &str) -> Result<()>;
}

/// Context provider backed by `kubectl config`.
#[derive(Debug, Clone, Default)]
pub struct KubectlContext {
    cwd: Option<PathBuf>,
}

impl KubectlContext {
    /// Create a provider that runs kubectl from the current directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run kubectl from `cwd`.
    pub fn in_dir(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: Some(cwd.into()),
        }
    }

    fn options(&self) -> CommandOptions {
        let mut options = CommandOptions::captured();
        options.cwd = self.cwd.clone();
        options
    }
}

impl ContextProvider for KubectlContext {
    fn current_context(&self) -> Option<String> {
        let result = execute_quiet("kubectl config current-context", self.cwd.as_deref()).ok()?;
        if !result.success {
            tracing::debug!("kubectl reported no current context: {}", result.stderr.trim());
            return None;
        }
        let context = result.stdout.trim_end_matches(['\r', '\n']).trim();
        (!context.is_empty()).then(|| context.to_string())
    }

    fn activate_context(&self, name: &str) -> Result<()> {
        let mut options = self.options();
        options.capture_stdout = false;
        execute_checked(&format!("kubectl config use-context {}", name), &options)?;
        Ok(())
    }
}

/// In-memory context provider.
///
/// Records every activation so callers can assert on them.
#[derive(Debug, Default)]
pub struct FixedContext {
    current: RefCell<Option<String>>,
    activations: RefCell<Vec<String>>,
}

impl FixedContext {
    /// Start with `current` selected.
    pub fn new(current: impl Into<String>) -> Self {
        Self {
            current: RefCell::new(Some(current.into())),
            activations: RefCell::new(Vec::new()),
        }
    }

    /// Start with no context selected.
    pub fn none() -> Self {
        Self::default()
    }

    /// Every context activated so far, oldest first.
    pub fn activations(&self) -> Vec<String> {
        self.activations.borrow().clone()
    }
}

impl ContextProvider for FixedContext {
    fn current_context(&self) -> Option<String> {
        self.current.borrow().clone()
    }

    fn activate_context(&self, name: &str) -> Result<()> {
        self.activations.borrow_mut().push(name.to_string());
        *self.current.borrow_mut() = Some(name.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_context_reports_current() {
        let provider = FixedContext::new("minikube");
        assert_eq!(provider.current_context(), Some("minikube".to_string()));
        assert_eq!(FixedContext::none().current_context(), None);
    }

    #[test]
    fn fixed_context_records_activations() {
        let provider = FixedContext::none();
        provider.activate_context("docker-desktop").unwrap();
        provider.activate_context("minikube").unwrap();

        assert_eq!(provider.current_context(), Some("minikube".to_string()));
        assert_eq!(provider.activations(), vec!["docker-desktop", "minikube"]);
    }
}
