//! Error types for stack operations.
//!
//! This module defines [`StackError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `StackError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `StackError::Other`) for unexpected errors
//! - Errors are surfaced verbatim by the command layer and never retried

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for stack operations.
#[derive(Debug, Error)]
pub enum StackError {
    /// Descriptor file not found at any of the expected locations.
    #[error("Stack configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Schema identifier does not match `stack/v<major>[(alpha|beta)<minor>]`.
    #[error("{version} is an invalid api version")]
    InvalidVersion { version: String },

    /// Schema identifier is well formed but not registered.
    #[error("unknown api version: '{version}'")]
    UnknownVersion { version: String },

    /// Descriptor was written for a newer schema than this CLI understands.
    #[error("config version {version} is too new for this version: upgrade stack CLI")]
    TooNew { version: String },

    /// Strict decode rejected the descriptor.
    #[error("unable to parse config: {message}")]
    SchemaError { message: String },

    /// Upgrade attempted on the newest schema revision.
    #[error("config version {version} is the latest and cannot be upgraded")]
    NotUpgradable { version: String },

    /// An upgrade step failed to advance the schema version.
    #[error("transforming stack config from {from} to {to}: version did not advance")]
    InvalidUpgrade { from: String, to: String },

    /// An environment entry is missing a required field.
    #[error("environment[{index}] {reason}")]
    InvalidEnvironment { index: usize, reason: String },

    /// An `env` activation predicate is not `KEY=VALUE`.
    #[error("expected activation env for '{environment}' as `key=value`, got `{value}` instead")]
    InvalidActivation { environment: String, value: String },

    /// More than one environment is active at the same time.
    #[error("multiple configurations active: {}", names.join(", "))]
    MultipleActive { names: Vec<String> },

    /// No environments are configured in the descriptor.
    #[error("no environments found - double check you are in a stack directory with configured environments")]
    NoEnvironments,

    /// A command requires an active environment and none matched.
    #[error("no active environment detected")]
    NoActiveEnvironment,

    /// Referenced environment or component does not exist.
    #[error("{kind} `{name}` not found")]
    NotFound { kind: &'static str, name: String },

    /// No components are configured in the descriptor.
    #[error("no components found - double check you are in a configured stack directory")]
    NoComponents,

    /// Component exists but does not allow port forwarding.
    #[error("component `{name}` is not exposable")]
    NotExposable { name: String },

    /// A required variable resolved to an empty value.
    #[error("missing environment variable: {name}")]
    MissingVariable { name: String },

    /// A confirmation was needed but no one could answer it.
    #[error("confirmation required: {question} (re-run interactively or pass --yes)")]
    ConfirmationRequired { question: String },

    /// The user declined a confirmation.
    #[error("aborted by user")]
    Aborted,

    /// Shell command failed.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StackError {
    /// Shorthand for a missing environment.
    pub fn environment_not_found(name: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "environment",
            name: name.into(),
        }
    }

    /// Shorthand for a missing component.
    pub fn component_not_found(name: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "component",
            name: name.into(),
        }
    }
}

/// Result type alias for stack operations.
pub type Result<T> = std::result::Result<T, StackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_not_found_displays_path() {
        let err = StackError::ConfigNotFound {
            path: PathBuf::from("/project/.stack-local.yaml"),
        };
        assert!(err.to_string().contains("/project/.stack-local.yaml"));
    }

    #[test]
    fn unknown_version_displays_identifier() {
        let err = StackError::UnknownVersion {
            version: "stack/v9".into(),
        };
        assert_eq!(err.to_string(), "unknown api version: 'stack/v9'");
    }

    #[test]
    fn too_new_tells_user_to_upgrade_cli() {
        let err = StackError::TooNew {
            version: "stack/v2".into(),
        };
        assert!(err.to_string().contains("upgrade stack CLI"));
    }

    #[test]
    fn multiple_active_lists_names() {
        let err = StackError::MultipleActive {
            names: vec!["local".into(), "ci".into()],
        };
        assert_eq!(err.to_string(), "multiple configurations active: local, ci");
    }

    #[test]
    fn not_found_names_kind() {
        let err = StackError::component_not_found("db");
        assert_eq!(err.to_string(), "component `db` not found");

        let err = StackError::environment_not_found("staging");
        assert_eq!(err.to_string(), "environment `staging` not found");
    }

    #[test]
    fn missing_variable_displays_name() {
        let err = StackError::MissingVariable { name: "B".into() };
        assert!(err.to_string().contains("B"));
    }

    #[test]
    fn command_failed_displays_command_and_code() {
        let err = StackError::CommandFailed {
            command: "kubectl apply -f app.yaml".into(),
            code: Some(1),
        };
        let msg = err.to_string();
        assert!(msg.contains("kubectl apply"));
        assert!(msg.contains("1"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: StackError = io_err.into();
        assert!(matches!(err, StackError::Io(_)));
    }
}
