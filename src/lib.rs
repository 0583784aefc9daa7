//! Stack - build and deploy multi-component projects to Kubernetes.
//!
//! A project describes its components, container images and deployment
//! environments in a versioned YAML descriptor. The library turns that
//! descriptor into the docker, kubetpl and kubectl invocations the `stack`
//! binary runs:
//!
//! 1. [`schema`] - schema revisions and the upgrade chain between them
//! 2. [`config`] - descriptor discovery and version-aware parsing
//! 3. [`environment`] - which environment is active, and switching to one
//! 4. [`components`] - which components and containers a command acts on
//! 5. [`invocation`] - the external commands themselves
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`error`] - Error types and result aliases
//! - [`shell`] - Shell command execution
//! - [`ui`] - Confirmations and terminal output
//!
//! # Example
//!
//! ```
//! use stack::config::parse_latest;
//! use stack::environment::resolve_active;
//!
//! let descriptor = br#"
//! apiVersion: stack/v1alpha1
//! stack:
//!   name: demo
//! environments:
//!   - name: local
//!     activation:
//!       context: docker-desktop || minikube
//! "#;
//!
//! let config = parse_latest(descriptor).unwrap();
//! assert_eq!(config.api_version, "stack/v1alpha2");
//!
//! let active = resolve_active(&config.environments, Some("minikube"), |_| None).unwrap();
//! assert_eq!(active.unwrap().name, "local");
//! ```

pub mod cli;
pub mod components;
pub mod config;
pub mod environment;
pub mod error;
pub mod invocation;
pub mod schema;
pub mod shell;
pub mod ui;

pub use error::{Result, StackError};
