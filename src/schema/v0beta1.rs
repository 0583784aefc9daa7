//! `stack/v0beta1`: the original descriptor shape.
//!
//! Descriptors from this era usually omit `apiVersion` entirely, and
//! `requiredVariables` is a plain list of variable names.

use serde::{Deserialize, Serialize};

use super::v1alpha1 as next;

/// Schema identifier for this revision.
pub const VERSION: &str = "stack/v0beta1";

/// Root of a `stack/v0beta1` descriptor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct StackConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
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
    /// Upgrade to `stack/v1alpha1`.
    ///
    /// Adds the `apiVersion` field and the component-level `environments`
    /// list, which starts out empty (unrestricted). Nothing is removed.
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
    next::ComponentDescription {
        name: component.name.clone(),
        required_variables: component.required_variables.clone(),
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
        environments: Vec::new(),
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

#[cfg(test)]
mod tests {
    use super::*;

    const LOCAL: &str = r#"
stack:
  name: app
environments:
  - name: local
    activation:
      env: ENV=local
      context: docker-desktop || minikube || microk8s
  - name: ci
    activation:
      env: ENV=ci
      context: minikube
  - name: staging
    activation:
      env: ENV=staging
      context: platform-stg-blue
      confirmWithUser: true
components:
  - name: app
    exposable: true
    containers:
      - dockerfile: ./containers/app/Dockerfile
        context: ./containers/app
        image: stack-app
        environments:
          - local
    manifests:
      - ./deployments/app.yaml
    requiredVariables:
      - RSA_KEY
    templateConfig: []
"#;

    const LOCAL_UPGRADED: &str = r#"
apiVersion: stack/v1alpha1
stack:
  name: app
environments:
  - name: local
    activation:
      env: ENV=local
      context: docker-desktop || minikube || microk8s
  - name: ci
    activation:
      env: ENV=ci
      context: minikube
  - name: staging
    activation:
      env: ENV=staging
      context: platform-stg-blue
      confirmWithUser: true
components:
  - name: app
    exposable: true
    containers:
      - dockerfile: ./containers/app/Dockerfile
        context: ./containers/app
        image: stack-app
        environments:
          - local
    manifests:
      - ./deployments/app.yaml
    environments: []
    requiredVariables:
      - RSA_KEY
    templateConfig: []
"#;

    #[test]
    fn upgrade_adds_version_and_component_environments() {
        let config: StackConfig = serde_yaml::from_str(LOCAL).unwrap();
        let expected: next::StackConfig = serde_yaml::from_str(LOCAL_UPGRADED).unwrap();

        assert_eq!(config.upgrade(), expected);
    }

    #[test]
    fn upgrade_leaves_source_untouched() {
        let config: StackConfig = serde_yaml::from_str(LOCAL).unwrap();
        let before = config.clone();

        let mut upgraded = config.upgrade();
        upgraded.stack.name = "renamed".to_string();
        upgraded.components[0].containers[0].environments.push("ci".to_string());
        upgraded.environments[0].activation.context = "other".to_string();

        assert_eq!(config, before);
        assert_eq!(config.components[0].containers[0].environments, vec!["local"]);
    }

    #[test]
    fn rejects_unknown_fields() {
        let result: Result<StackConfig, _> = serde_yaml::from_str("stack:\n  nmae: typo\n");
        assert!(result.is_err());
    }

    #[test]
    fn empty_upgrade_has_no_components() {
        let upgraded = StackConfig::default().upgrade();
        assert_eq!(upgraded.api_version, next::VERSION);
        assert!(upgraded.components.is_empty());
        assert!(upgraded.environments.is_empty());
    }
}
