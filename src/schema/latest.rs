//! `stack/v1alpha2`: the newest descriptor schema.
//!
//! Every command operates on these types. Older revisions are upgraded into
//! this shape by the migration chain in [`super`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Schema identifier for this revision.
pub const VERSION: &str = "stack/v1alpha2";

/// Root of a resolved stack descriptor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct StackConfig {
    /// Schema identifier this value conforms to.
    pub api_version: String,
    /// Project-level metadata.
    pub stack: StackDescription,
    /// Buildable/deployable units, in declaration order.
    pub components: Vec<ComponentDescription>,
    /// Deployment targets, in declaration order.
    pub environments: Vec<EnvironmentDescription>,
}

/// Project-level metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct StackDescription {
    /// Human label for the stack; also used to label cluster secrets.
    pub name: String,
}

/// Conditions under which an environment is considered active.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ActivationDescription {
    /// Ask before mutating anything while this environment is active.
    pub confirm_with_user: bool,
    /// Optional `KEY=VALUE` predicate on the process environment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<String>,
    /// One or more kubectl contexts joined by `||`.
    pub context: String,
}

impl ActivationDescription {
    /// The `env` predicate, treating an empty string as absent.
    pub fn env_predicate(&self) -> Option<&str> {
        self.env.as_deref().map(str::trim).filter(|e| !e.is_empty())
    }

    /// Candidate contexts, trimmed, in declaration order. Blank entries are dropped.
    pub fn contexts(&self) -> Vec<&str> {
        self.context
            .split("||")
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .collect()
    }
}

/// A named deployment target.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct EnvironmentDescription {
    pub name: String,
    pub activation: ActivationDescription,
}

/// A named, independently buildable and deployable unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ComponentDescription {
    pub name: String,
    /// Variable name to secret manager identifier, in declaration order.
    pub required_variables: IndexMap<String, String>,
    /// Whether `stack expose` may port-forward to this component.
    pub exposable: bool,
    pub containers: Vec<ContainerDescription>,
    /// Manifest templates, relative to the stack directory.
    pub manifests: Vec<String>,
    /// Extra template data files passed to kubetpl.
    pub template_config: Vec<String>,
    /// Environments this component is restricted to; empty means all.
    pub environments: Vec<String>,
}

impl ComponentDescription {
    /// Names of the variables that must be set to deploy this component.
    pub fn required_variable_names(&self) -> impl Iterator<Item = &str> {
        self.required_variables.keys().map(String::as_str)
    }
}

/// An image built from a Dockerfile as part of a component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ContainerDescription {
    pub dockerfile: String,
    /// Build context directory, relative to the stack directory.
    pub context: String,
    pub image: String,
    /// Environments this container is restricted to; empty means all.
    pub environments: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contexts_are_split_and_trimmed() {
        let activation = ActivationDescription {
            context: "docker-desktop || minikube ||microk8s".to_string(),
            ..Default::default()
        };
        assert_eq!(
            activation.contexts(),
            vec!["docker-desktop", "minikube", "microk8s"]
        );
    }

    #[test]
    fn blank_contexts_are_dropped() {
        let activation = ActivationDescription {
            context: " || minikube ||".to_string(),
            ..Default::default()
        };
        assert_eq!(activation.contexts(), vec!["minikube"]);
        assert!(ActivationDescription::default().contexts().is_empty());
    }

    #[test]
    fn blank_env_predicate_is_absent() {
        let mut activation = ActivationDescription::default();
        assert_eq!(activation.env_predicate(), None);

        activation.env = Some("  ".to_string());
        assert_eq!(activation.env_predicate(), None);

        activation.env = Some("ENV=ci".to_string());
        assert_eq!(activation.env_predicate(), Some("ENV=ci"));
    }

    #[test]
    fn parses_mapping_form_of_required_variables() {
        let component: ComponentDescription = serde_yaml::from_str(
            "name: app\nrequiredVariables:\n  RSA_KEY: platform-rsa-key\n  DEBUG: ''\n",
        )
        .unwrap();

        let names: Vec<_> = component.required_variable_names().collect();
        assert_eq!(names, vec!["RSA_KEY", "DEBUG"]);
        assert_eq!(component.required_variables["RSA_KEY"], "platform-rsa-key");
    }

    #[test]
    fn serializes_camel_case() {
        let config = StackConfig {
            api_version: VERSION.to_string(),
            ..Default::default()
        };
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("apiVersion: stack/v1alpha2"));
    }
}
