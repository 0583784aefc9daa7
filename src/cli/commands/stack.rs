//! Shared state for commands that act on a loaded stack.

use std::rc::Rc;

use crate::config::{load_latest, ConfigPaths};
use crate::environment::{
    process_env, resolve_active, resolve_build, validate, ContextProvider, KubectlContext,
};
use crate::error::{Result, StackError};
use crate::schema::latest::{EnvironmentDescription, StackConfig};
use crate::shell::{Executor, SystemExecutor};
use crate::ui::{Prompt, UserInterface};

type EnvLookup = Rc<dyn Fn(&str) -> Option<String>>;

/// A loaded descriptor plus the outside world commands talk to.
///
/// Built once by the dispatcher and passed explicitly to each command.
/// The cluster context, external commands and environment variables are
/// all replaceable so commands can run against in-memory fakes.
pub struct StackContext {
    paths: ConfigPaths,
    config: StackConfig,
    contexts: Rc<dyn ContextProvider>,
    executor: Rc<dyn Executor>,
    env: EnvLookup,
}

impl StackContext {
    /// Load the descriptor at `paths`, upgraded to the latest schema.
    pub fn load(paths: ConfigPaths) -> Result<Self> {
        let config = load_latest(&paths)?;
        Ok(Self::new(paths, config))
    }

    /// Wrap an already loaded descriptor, using kubectl, the system shell
    /// and the process environment.
    pub fn new(paths: ConfigPaths, config: StackConfig) -> Self {
        Self {
            paths,
            config,
            contexts: Rc::new(KubectlContext::new()),
            executor: Rc::new(SystemExecutor),
            env: Rc::new(process_env),
        }
    }

    /// Replace the cluster context provider.
    pub fn with_contexts(mut self, contexts: Rc<dyn ContextProvider>) -> Self {
        self.contexts = contexts;
        self
    }

    /// Replace the external command executor.
    pub fn with_executor(mut self, executor: Rc<dyn Executor>) -> Self {
        self.executor = executor;
        self
    }

    /// Replace the environment variable lookup.
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + 'static,
    {
        self.env = Rc::new(lookup);
        self
    }

    pub fn paths(&self) -> &ConfigPaths {
        &self.paths
    }

    pub fn config(&self) -> &StackConfig {
        &self.config
    }

    pub fn contexts(&self) -> &dyn ContextProvider {
        self.contexts.as_ref()
    }

    pub fn executor(&self) -> &dyn Executor {
        self.executor.as_ref()
    }

    /// Look up an environment variable.
    pub fn lookup(&self, key: &str) -> Option<String> {
        (self.env)(key)
    }

    /// The environment active for the current cluster context, if any.
    pub fn active_environment(&self) -> Result<Option<&EnvironmentDescription>> {
        let current = self.contexts.current_context();
        resolve_active(&self.config.environments, current.as_deref(), |key| {
            self.lookup(key)
        })
    }

    /// Check the configured environments against the current cluster context.
    pub fn validate_environments(&self) -> Result<()> {
        let current = self.contexts.current_context();
        validate(&self.config.environments, current.as_deref(), |key| {
            self.lookup(key)
        })
    }

    /// The active environment, for commands that cannot run without one.
    ///
    /// # Errors
    ///
    /// `NoEnvironments` when none are configured, `NoActiveEnvironment` when
    /// none is active, plus anything [`resolve_active`] reports.
    pub fn require_active_environment(&self) -> Result<&EnvironmentDescription> {
        if self.config.environments.is_empty() {
            return Err(StackError::NoEnvironments);
        }
        self.active_environment()?
            .ok_or(StackError::NoActiveEnvironment)
    }

    /// The environment builds target, decided by `env` predicates alone.
    pub fn build_environment(&self) -> Result<Option<&EnvironmentDescription>> {
        resolve_build(&self.config.environments, |key| self.lookup(key))
    }

    /// Ask before a mutating command when the environment requires it.
    ///
    /// # Errors
    ///
    /// `Aborted` when the user declines.
    pub fn confirm_if_required(
        &self,
        environment: &EnvironmentDescription,
        ui: &mut dyn UserInterface,
        prompt: Prompt,
    ) -> Result<()> {
        if !environment.activation.confirm_with_user {
            return Ok(());
        }
        if ui.confirm(&prompt)? {
            Ok(())
        } else {
            Err(StackError::Aborted)
        }
    }
}
