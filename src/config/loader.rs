//! Descriptor discovery and loading.
//!
//! The descriptor lives in the stack directory. Its base name defaults to
//! `.stack-local`, falling back to `.stack`, and the extension is inferred
//! when omitted.

use crate::config::parser::{parse_config, parse_latest};
use crate::error::{Result, StackError};
use crate::schema::{latest, VersionedConfig};
use std::fs;
use std::path::{Path, PathBuf};

/// Base names tried, in order, when no config file is given.
pub const DEFAULT_CONFIG_FILES: &[&str] = &[".stack-local", ".stack"];

/// Extensions tried, in order, for a base name without one.
const EXTENSIONS: &[&str] = &["yaml", "yml"];

/// Where to look for the stack descriptor.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Directory holding the descriptor; manifest and build paths are relative to it.
    pub stack_directory: PathBuf,

    /// Explicit descriptor file name, relative to `stack_directory`.
    pub config_file: Option<String>,
}

impl ConfigPaths {
    /// Create paths for the given directory and optional file name.
    pub fn new(stack_directory: impl Into<PathBuf>, config_file: Option<String>) -> Self {
        Self {
            stack_directory: stack_directory.into(),
            config_file: config_file.filter(|f| !f.trim().is_empty()),
        }
    }

    /// Every path that may hold the descriptor, in lookup order.
    pub fn candidates(&self) -> Vec<PathBuf> {
        let bases: Vec<&str> = match &self.config_file {
            Some(file) => vec![file.as_str()],
            None => DEFAULT_CONFIG_FILES.to_vec(),
        };

        bases
            .into_iter()
            .flat_map(|base| expand_extension(base))
            .map(|name| self.stack_directory.join(name))
            .collect()
    }

    /// Find the descriptor on disk.
    ///
    /// # Errors
    ///
    /// Returns `ConfigNotFound` naming the first candidate when none exist.
    pub fn resolve(&self) -> Result<PathBuf> {
        let candidates = self.candidates();
        if let Some(found) = candidates.iter().find(|p| p.is_file()) {
            tracing::debug!("Using stack config {}", found.display());
            return Ok(found.clone());
        }

        Err(StackError::ConfigNotFound {
            path: candidates
                .into_iter()
                .next()
                .unwrap_or_else(|| self.stack_directory.clone()),
        })
    }

    /// Resolve a descriptor-relative path against the stack directory.
    pub fn relative(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.stack_directory.join(path)
        }
    }
}

/// Names to try for one base name.
///
/// A single leading `.` does not count as an extension separator, so
/// `.stack` expands while `.stack.yml` and `stack.yaml` are used as given.
fn expand_extension(base: &str) -> Vec<String> {
    let stem = base.strip_prefix('.').unwrap_or(base);
    let file_name = Path::new(stem)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(stem);

    if file_name.contains('.') {
        vec![base.to_string()]
    } else {
        EXTENSIONS
            .iter()
            .map(|ext| format!("{}.{}", base, ext))
            .collect()
    }
}

/// Read raw descriptor bytes.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
pub fn read_descriptor(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            StackError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            StackError::Io(e)
        }
    })
}

/// Find, read and parse the descriptor.
pub fn load_config(paths: &ConfigPaths, upgrade: bool) -> Result<VersionedConfig> {
    let path = paths.resolve()?;
    let bytes = read_descriptor(&path)?;
    parse_config(&bytes, upgrade)
}

/// Find, read and parse the descriptor, upgraded to the latest schema.
pub fn load_latest(paths: &ConfigPaths) -> Result<latest::StackConfig> {
    let path = paths.resolve()?;
    let bytes = read_descriptor(&path)?;
    parse_latest(&bytes)
}
