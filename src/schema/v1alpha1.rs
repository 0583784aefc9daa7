//! `stack/v1alpha1`: versioned descriptors with component-level environments.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::latest as next;

/// Schema identifier for this revision.
pub const VERSION: &str = "stack/v1alpha1";

/// Root of a `stack/v1alpha1` descriptor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct StackConfig {
    pub api_version: String,
    pub stack: StackDescription,
    pub components: Vec<ComponentDescription>,
    pub environments: Vec<EnvironmentDescription>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct StackDescription {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ActivationDescription {
    pub confirm_with_user: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<String>,
    pub context: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct EnvironmentDescription {
    pub name: String,
    pub activation: ActivationDescription,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ComponentDescription {
    pub name: String,
    pub required_variables: Vec<String>,
    pub exposable: bool,
    pub containers: Vec<ContainerDescription>,
    pub manifests: Vec<String>,
    pub template_config: Vec<String>,
    /// Environments this component is restricted to; empty means all.
    pub environments: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ContainerDescription {
    pub dockerfile: String,
    pub context: String,
    pub image: String,
    pub environments: Vec<String>,
}

impl StackConfig {
    /// Upgrade to `stack/v1alpha2`.
    ///
    /// `requiredVariables` becomes a mapping from variable name to secret
    /// manager identifier. Promoted names get an empty identifier, which means
    /// the value is only ever read from the process environment.
    pub fn upgrade(&self) -> next::StackConfig {
        next::StackConfig {
            api_version: next::VERSION.to_string(),
            stack: next::StackDescription {
                name: self.stack.name.clone(),
            },
            components: self.components.iter().map(upgrade_component).collect(),
            environments: self.environments.iter().map(upgrade_environment).collect(),
        }
    }
}

fn upgrade_component(component: &ComponentDescription) -> next::ComponentDescription {
    let required_variables: IndexMap<String, String> = component
        .required_variables
        .iter()
        .map(|name| (name.clone(), String::new()))
        .collect();

    next::ComponentDescription {
        name: component.name.clone(),
        required_variables,
        exposable: component.exposable,
        containers: component
            .containers
            .iter()
            .map(|container| next::ContainerDescription {
                dockerfile: container.dockerfile.clone(),
                context: container.context.clone(),
                image: container.image.clone(),
                environments: container.environments.clone(),
            })
            .collect(),
        manifests: component.manifests.clone(),
        template_config: component.template_config.clone(),
        environments: component.environments.clone(),
    }
}

fn upgrade_environment(environment: &EnvironmentDescription) -> next::EnvironmentDescription {
    next::EnvironmentDescription {
        name: environment.name.clone(),
        activation: next::ActivationDescription {
            confirm_with_user: environment.activation.confirm_with_user,
            env: environment.activation.env.clone(),
            context: environment.activation.context.clone(),
        },
    }
}
