//! Component and container selection.
//!
//! Narrows the configured components to the ones a command should act on,
//! filters containers by the active environment, and resolves each
//! component's required variables before any template is rendered.

use std::fmt;

use crate::error::{Result, StackError};
use crate::schema::latest::{ComponentDescription, ContainerDescription};

/// A resolved `KEY=value` pair passed to the template renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvVar {
    pub key: String,
    pub value: String,
}

impl fmt::Display for EnvVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=\"{}\"", self.key, self.value)
    }
}

/// Pick the components a command should act on.
///
/// With no names requested every configured component is returned. Either
/// way the configured order is kept.
///
/// # Errors
///
/// - `NoComponents` when nothing is configured, whatever was requested
/// - `NotFound` when a requested name is not configured
///
/// # Example
///
/// ```
/// use stack::components::select_components;
/// use stack::schema::latest::ComponentDescription;
///
/// let configured = vec![
///     ComponentDescription { name: "app".into(), ..Default::default() },
///     ComponentDescription { name: "db".into(), ..Default::default() },
/// ];
///
/// let selected = select_components(&["app"], &configured).unwrap();
/// assert_eq!(selected.len(), 1);
/// assert_eq!(selected[0].name, "app");
///
/// let all = select_components::<&str>(&[], &configured).unwrap();
/// assert_eq!(all.len(), 2);
/// ```
pub fn select_components<'a, S>(
    requested: &[S],
    configured: &'a [ComponentDescription],
) -> Result<Vec<&'a ComponentDescription>>
where
    S: AsRef<str>,
{
    if configured.is_empty() {
        return Err(StackError::NoComponents);
    }

    if let Some(unknown) = requested
        .iter()
        .map(AsRef::as_ref)
        .find(|name| !configured.iter().any(|c| c.name == *name))
    {
        return Err(StackError::component_not_found(unknown));
    }

    let selected: Vec<_> = configured
        .iter()
        .filter(|c| requested.is_empty() || requested.iter().any(|r| r.as_ref() == c.name))
        .collect();

    tracing::debug!(
        "Selected components: {}",
        selected
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    Ok(selected)
}

/// Look up a single component by name.
pub fn find_component<'a>(
    configured: &'a [ComponentDescription],
    name: &str,
) -> Result<&'a ComponentDescription> {
    if configured.is_empty() {
        return Err(StackError::NoComponents);
    }
    configured
        .iter()
        .find(|c| c.name == name)
        .ok_or_else(|| StackError::component_not_found(name))
}

/// Whether `active` satisfies an environment allow-list.
///
/// An empty list allows everything. Otherwise the active environment must be
/// listed, so with no active environment only unrestricted entries pass.
fn allowed(environments: &[String], active: Option<&str>) -> bool {
    environments.is_empty() || active.is_some_and(|a| environments.iter().any(|e| e == a))
}

/// Whether a container should be built for the active environment.
pub fn container_eligible(container: &ContainerDescription, active: Option<&str>) -> bool {
    allowed(&container.environments, active)
}

/// Whether a component should be deployed to the active environment.
pub fn component_eligible(component: &ComponentDescription, active: Option<&str>) -> bool {
    allowed(&component.environments, active)
}

/// Containers of `component` to build, optionally narrowed to one image.
///
/// Containers excluded by their environment list are logged and skipped.
pub fn select_containers<'a>(
    component: &'a ComponentDescription,
    active: Option<&str>,
    image: Option<&str>,
) -> Vec<&'a ContainerDescription> {
    component
        .containers
        .iter()
        .filter(|container| image.map_or(true, |i| container.image == i))
        .filter(|container| {
            let eligible = container_eligible(container, active);
            if !eligible {
                tracing::warn!(
                    "skipping build for image `{}`: not in active environment",
                    container.image
                );
            }
            eligible
        })
        .collect()
}

/// Resolve every required variable through `lookup`.
///
/// All or nothing: the first variable that is unset or empty fails the
/// whole call, so a template never receives a blank value.
pub fn generate_envs<I, S, F>(names: I, lookup: F) -> Result<Vec<EnvVar>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    F: Fn(&str) -> Option<String>,
{
    names
        .into_iter()
        .map(|name| {
            let name = name.as_ref();
            match lookup(name).filter(|v| !v.is_empty()) {
                Some(value) => Ok(EnvVar {
                    key: name.to_string(),
                    value,
                }),
                None => Err(StackError::MissingVariable {
                    name: name.to_string(),
                }),
            }
        })
        .collect()
}
