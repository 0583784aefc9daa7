//! Environment resolution.
//!
//! [`validate`] checks the configured environments and rejects ambiguous
//! activation. [`resolve_active`] validates and then picks the single active
//! environment, which may be none. [`switch_to`] goes the other way and
//! activates a named environment's context.

use std::collections::HashSet;

use super::activation::{is_active, is_build_active, parse_env_predicate};
use super::context::ContextProvider;
use crate::error::{Result, StackError};
use crate::schema::latest::EnvironmentDescription;

/// What happened when switching environments.
#[derive(Debug, Clone, PartialEq)]
pub enum SwitchOutcome<'a> {
    /// The context was activated and the `env` predicate (if any) already holds.
    Switched {
        environment: &'a EnvironmentDescription,
        context: String,
    },
    /// The context was activated, but the parent shell must export a variable
    /// before the environment is active.
    NeedsExport {
        environment: &'a EnvironmentDescription,
        context: String,
        key: String,
        value: String,
    },
}

impl SwitchOutcome<'_> {
    /// The environment that was switched to.
    pub fn environment(&self) -> &EnvironmentDescription {
        match self {
            Self::Switched { environment, .. } | Self::NeedsExport { environment, .. } => {
                environment
            }
        }
    }

    /// The context that was activated.
    pub fn context(&self) -> &str {
        match self {
            Self::Switched { context, .. } | Self::NeedsExport { context, .. } => context,
        }
    }
}

/// Check that environments are well formed and at most one is active.
///
/// # Errors
///
/// - `InvalidEnvironment` for a missing name, a duplicate name, or a blank context
/// - `InvalidActivation` for an `env` predicate that is not `KEY=VALUE`
/// - `MultipleActive` when more than one environment is active
pub fn validate<F>(
    environments: &[EnvironmentDescription],
    current_context: Option<&str>,
    lookup: F,
) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let mut seen = HashSet::new();
    let mut active = Vec::new();

    for (index, environment) in environments.iter().enumerate() {
        if environment.name.trim().is_empty() {
            return Err(StackError::InvalidEnvironment {
                index,
                reason: "has no name".to_string(),
            });
        }
        if !seen.insert(environment.name.as_str()) {
            return Err(StackError::InvalidEnvironment {
                index,
                reason: format!("duplicates the name `{}`", environment.name),
            });
        }
        if environment.activation.contexts().is_empty() {
            return Err(StackError::InvalidEnvironment {
                index,
                reason: format!(
                    "`{}` has no activation context: expecting a string or || concatenated list",
                    environment.name
                ),
            });
        }
        if let Some(predicate) = environment.activation.env_predicate() {
            parse_env_predicate(environment, predicate)?;
        }

        if is_active(environment, current_context, &lookup)? {
            active.push(environment.name.clone());
        }
    }

    if active.len() > 1 {
        return Err(StackError::MultipleActive { names: active });
    }
    Ok(())
}

/// Find the single active environment.
///
/// Runs [`validate`] first, then evaluates the predicates again to pick the
/// match. `Ok(None)` means no environment is active, which is not an error.
///
/// # Example
///
/// ```
/// use stack::environment::resolve_active;
/// use stack::schema::latest::{ActivationDescription, EnvironmentDescription};
///
/// let environments = vec![EnvironmentDescription {
///     name: "local".to_string(),
///     activation: ActivationDescription {
///         context: "docker-desktop || minikube".to_string(),
///         ..Default::default()
///     },
/// }];
///
/// let active = resolve_active(&environments, Some("minikube"), |_| None).unwrap();
/// assert_eq!(active.map(|e| e.name.as_str()), Some("local"));
///
/// let none = resolve_active(&environments, Some("prod"), |_| None).unwrap();
/// assert!(none.is_none());
/// ```
pub fn resolve_active<'a, F>(
    environments: &'a [EnvironmentDescription],
    current_context: Option<&str>,
    lookup: F,
) -> Result<Option<&'a EnvironmentDescription>>
where
    F: Fn(&str) -> Option<String>,
{
    validate(environments, current_context, &lookup)?;

    for environment in environments {
        if is_active(environment, current_context, &lookup)? {
            tracing::debug!("Resolved active environment {}", environment.name);
            return Ok(Some(environment));
        }
    }

    tracing::debug!(
        "No environment active for context {}",
        current_context.unwrap_or("<none>")
    );
    Ok(None)
}

/// Find the environment active for a build, ignoring the cluster context.
///
/// The first environment whose `env` predicate holds wins.
pub fn resolve_build<'a, F>(
    environments: &'a [EnvironmentDescription],
    lookup: F,
) -> Result<Option<&'a EnvironmentDescription>>
where
    F: Fn(&str) -> Option<String>,
{
    for environment in environments {
        if is_build_active(environment, &lookup)? {
            tracing::debug!("Resolved build environment {}", environment.name);
            return Ok(Some(environment));
        }
    }
    Ok(None)
}

/// Look up an environment by name.
pub fn find_environment<'a>(
    environments: &'a [EnvironmentDescription],
    name: &str,
) -> Result<&'a EnvironmentDescription> {
    environments
        .iter()
        .find(|e| e.name == name)
        .ok_or_else(|| StackError::environment_not_found(name))
}

/// Activate the named environment.
///
/// Among the environment's context candidates the current one is kept if
/// present, otherwise the first is activated. The process cannot change its
/// parent shell's variables, so an unmet `env` predicate is returned as
/// [`SwitchOutcome::NeedsExport`] for the caller to report.
pub fn switch_to<'a, P, F>(
    environments: &'a [EnvironmentDescription],
    target: &str,
    provider: &P,
    lookup: F,
) -> Result<SwitchOutcome<'a>>
where
    P: ContextProvider + ?Sized,
    F: Fn(&str) -> Option<String>,
{
    let environment = find_environment(environments, target)?;

    let candidates = environment.activation.contexts();
    let current = provider.current_context();
    let context = candidates
        .iter()
        .find(|c| Some(**c) == current.as_deref())
        .or_else(|| candidates.first())
        .map(|c| c.to_string())
        .ok_or_else(|| StackError::InvalidEnvironment {
            index: environments
                .iter()
                .position(|e| e.name == target)
                .unwrap_or_default(),
            reason: format!("`{}` has no activation context", target),
        })?;

    provider.activate_context(&context)?;
    tracing::debug!("Activated context {} for environment {}", context, target);

    if let Some(predicate) = environment.activation.env_predicate() {
        let (key, value) = parse_env_predicate(environment, predicate)?;
        if lookup(key).unwrap_or_default() != value {
            return Ok(SwitchOutcome::NeedsExport {
                environment,
                context,
                key: key.to_string(),
                value: value.to_string(),
            });
        }
    }

    Ok(SwitchOutcome::Switched {
        environment,
        context,
    })
}
