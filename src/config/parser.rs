//! Version-aware descriptor parsing.
//!
//! Parsing happens in four steps:
//! 1. Peek at the top-level `apiVersion` (defaulting to the oldest schema)
//! 2. Look the version up in the schema registry
//! 3. Drop top-level keys starting with `.` (YAML anchor holders)
//! 4. Strictly decode the rest into that revision's types

use crate::error::{Result, StackError};
use crate::schema::{self, latest, VersionedConfig};

/// Parse descriptor bytes into a versioned config.
///
/// When `upgrade` is set the result is always at [`schema::LATEST`];
/// otherwise it is returned in whatever revision it declared.
///
/// # Example
///
/// ```
/// use stack::config::parse_config;
///
/// let yaml = b"stack:\n  name: app\n";
/// let parsed = parse_config(yaml, false).unwrap();
/// assert_eq!(parsed.version(), "stack/v0beta1");
///
/// let upgraded = parse_config(yaml, true).unwrap();
/// assert_eq!(upgraded.version(), stack::schema::LATEST);
/// ```
pub fn parse_config(bytes: &[u8], upgrade: bool) -> Result<VersionedConfig> {
    let mut document = load_document(bytes)?;

    let api_version = detect_version(&document)?;
    tracing::debug!("Detected stack config version {}", api_version);

    let version = schema::find(&api_version)
        .ok_or_else(|| StackError::UnknownVersion {
            version: api_version.clone(),
        })?;

    strip_anchor_keys(&mut document);
    let mut document = serde_yaml::Value::Mapping(document);
    document.apply_merge().map_err(|e| StackError::SchemaError {
        message: e.to_string(),
    })?;

    let config = (version.decode)(document)?;

    if upgrade && config.version() != schema::LATEST {
        return schema::upgrade_to_latest(config);
    }
    Ok(config)
}

/// Parse descriptor bytes and upgrade them to the latest schema.
pub fn parse_latest(bytes: &[u8]) -> Result<latest::StackConfig> {
    let config = parse_config(bytes, true)?;
    let version = config.version();
    config
        .into_latest()
        .ok_or_else(|| StackError::InvalidUpgrade {
            from: version.to_string(),
            to: schema::LATEST.to_string(),
        })
}

/// Decode the raw bytes into a top-level mapping.
///
/// Empty documents count as an empty mapping.
fn load_document(bytes: &[u8]) -> Result<serde_yaml::Mapping> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_yaml::Mapping::new());
    }

    let value: serde_yaml::Value =
        serde_yaml::from_slice(bytes).map_err(|e| StackError::SchemaError {
            message: format!("unable to parse YAML: {}", e),
        })?;

    match value {
        serde_yaml::Value::Mapping(mapping) => Ok(mapping),
        serde_yaml::Value::Null => Ok(serde_yaml::Mapping::new()),
        other => Err(StackError::SchemaError {
            message: format!(
                "expected a mapping at the top level, found {}",
                describe(&other)
            ),
        }),
    }
}

/// Read `apiVersion`, falling back to the oldest schema when it is absent.
///
/// Descriptors written before the field existed have no `apiVersion`, so a
/// missing value is not an error.
fn detect_version(document: &serde_yaml::Mapping) -> Result<String> {
    match document.get("apiVersion") {
        None | Some(serde_yaml::Value::Null) => Ok(schema::OLDEST.to_string()),
        Some(serde_yaml::Value::String(version)) if version.is_empty() => {
            Ok(schema::OLDEST.to_string())
        }
        Some(serde_yaml::Value::String(version)) => Ok(version.clone()),
        Some(other) => Err(StackError::SchemaError {
            message: format!("apiVersion must be a string, found {}", describe(other)),
        }),
    }
}

/// Remove top-level keys that only exist to hold YAML anchors.
fn strip_anchor_keys(document: &mut serde_yaml::Mapping) {
    document.retain(|key, _| !matches!(key.as_str(), Some(k) if k.starts_with('.')));
}

fn describe(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "a boolean",
        serde_yaml::Value::Number(_) => "a number",
        serde_yaml::Value::String(_) => "a string",
        serde_yaml::Value::Sequence(_) => "a sequence",
        serde_yaml::Value::Mapping(_) => "a mapping",
        serde_yaml::Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE: &str = r#"
apiVersion: stack/v0beta1
stack:
  name: app
environments:
  - name: local
    activation:
      context: minikube
components: []
"#;

    const COMPLETE: &str = r#"
apiVersion: stack/v0beta1
stack:
  name: app
environments:
  - name: local
    activation:
      context: cluster1
components:
  - name: app
    exposable: true
    containers:
      - dockerfile: ./containers/app/Dockerfile
        context: ./containers/app
        image: stack-app
    manifests:
      - ./deployments/app.yaml
"#;

    #[test]
    fn simple_config_upgrades_to_latest() {
        let config = parse_latest(SIMPLE.as_bytes()).unwrap();

        assert_eq!(config.api_version, schema::LATEST);
        assert_eq!(config.stack.name, "app");
        assert_eq!(config.environments.len(), 1);
        assert_eq!(config.environments[0].name, "local");
        assert_eq!(config.environments[0].activation.context, "minikube");
        assert!(config.components.is_empty());
    }

    #[test]
    fn complete_config_upgrades_to_latest() {
        let config = parse_latest(COMPLETE.as_bytes()).unwrap();

        let app = &config.components[0];
        assert_eq!(app.name, "app");
        assert!(app.exposable);
        assert_eq!(app.containers[0].image, "stack-app");
        assert_eq!(app.manifests, vec!["./deployments/app.yaml"]);
        assert!(app.environments.is_empty());
        assert!(app.required_variables.is_empty());
    }

    #[test]
    fn missing_api_version_defaults_to_oldest() {
        let config = parse_config(b"stack:\n  name: app\n", false).unwrap();
        assert_eq!(config.version(), schema::OLDEST);
    }

    #[test]
    fn empty_document_parses() {
        let config = parse_config(b"", false).unwrap();
        assert_eq!(config.version(), schema::OLDEST);

        let config = parse_latest(b"\n").unwrap();
        assert!(config.components.is_empty());
        assert!(config.environments.is_empty());
    }

    #[test]
    fn without_upgrade_keeps_declared_revision() {
        let config = parse_config(SIMPLE.as_bytes(), false).unwrap();
        assert!(matches!(config, VersionedConfig::V0beta1(_)));
    }

    #[test]
    fn latest_config_is_returned_unchanged() {
        let yaml = r#"
apiVersion: stack/v1alpha2
stack:
  name: app
components:
  - name: app
    requiredVariables:
      RSA_KEY: platform-rsa-key
"#;
        let config = parse_latest(yaml.as_bytes()).unwrap();
        assert_eq!(
            config.components[0].required_variables["RSA_KEY"],
            "platform-rsa-key"
        );
    }

    #[test]
    fn unknown_version_is_rejected() {
        let result = parse_config(b"apiVersion: stack/v9alpha1\n", true);
        assert!(matches!(
            result,
            Err(StackError::UnknownVersion { version }) if version == "stack/v9alpha1"
        ));
    }

    #[test]
    fn non_string_version_is_rejected() {
        let result = parse_config(b"apiVersion: 1\n", true);
        assert!(matches!(result, Err(StackError::SchemaError { .. })));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let yaml = "apiVersion: stack/v0beta1\nstack:\n  name: app\ncomponnets: []\n";
        let result = parse_config(yaml.as_bytes(), true);
        assert!(matches!(result, Err(StackError::SchemaError { .. })));
    }

    #[test]
    fn nested_unknown_fields_are_rejected() {
        let yaml = r#"
environments:
  - name: local
    activation:
      contexts: minikube
"#;
        let result = parse_config(yaml.as_bytes(), true);
        assert!(matches!(result, Err(StackError::SchemaError { .. })));
    }

    #[test]
    fn fields_from_newer_revisions_are_rejected_in_older_ones() {
        let yaml = r#"
apiVersion: stack/v0beta1
components:
  - name: app
    environments: [local]
"#;
        let result = parse_config(yaml.as_bytes(), true);
        assert!(matches!(result, Err(StackError::SchemaError { .. })));
    }

    #[test]
    fn dotted_top_level_keys_hold_anchors() {
        let yaml = r#"
apiVersion: stack/v1alpha1
.container-defaults: &defaults
  dockerfile: ./Dockerfile
  context: .
stack:
  name: app
components:
  - name: app
    containers:
      - <<: *defaults
        image: app
      - <<: *defaults
        image: worker
"#;
        let config = parse_latest(yaml.as_bytes()).unwrap();
        let containers = &config.components[0].containers;
        assert_eq!(containers.len(), 2);
        assert_eq!(containers[0].dockerfile, "./Dockerfile");
        assert_eq!(containers[1].image, "worker");
        assert_eq!(containers[1].context, ".");
    }

    #[test]
    fn top_level_sequence_is_rejected() {
        let result = parse_config(b"- a\n- b\n", true);
        assert!(matches!(result, Err(StackError::SchemaError { .. })));
    }

    #[test]
    fn invalid_yaml_is_rejected() {
        let result = parse_config(b"stack: [unterminated", true);
        assert!(matches!(result, Err(StackError::SchemaError { .. })));
    }
}
