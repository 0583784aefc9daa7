//! Descriptor discovery and version-aware parsing.
//!
//! - File discovery and loading in [`loader`]
//! - Version detection and strict decoding in [`parser`]
//!
//! # Example
//!
//! ```
//! use stack::config::{load_latest, ConfigPaths};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join(".stack.yaml"), "stack:\n  name: test\n").unwrap();
//!
//! let config = load_latest(&ConfigPaths::new(temp.path(), None)).unwrap();
//! assert_eq!(config.stack.name, "test");
//! assert_eq!(config.api_version, stack::schema::LATEST);
//! ```
//!
//! # Descriptor Locations
//!
//! Without an explicit file name, the stack directory is searched for:
//! 1. `.stack-local.yaml` / `.stack-local.yml`
//! 2. `.stack.yaml` / `.stack.yml`

pub mod loader;
pub mod parser;

pub use loader::{
    load_config, load_latest, read_descriptor, ConfigPaths, DEFAULT_CONFIG_FILES,
};
pub use parser::{parse_config, parse_latest};
