//! Versioned descriptor schemas and the migration chain.
//!
//! Each schema revision lives in its own module with its own types. A
//! [`VersionedConfig`] holds a descriptor in exactly one revision, and
//! [`upgrade_to_latest`] walks it forward one revision at a time until it
//! reaches [`latest::VERSION`].
//!
//! # Example
//!
//! ```
//! use stack::schema::{upgrade_to_latest, v0beta1, VersionedConfig, LATEST};
//!
//! let old = VersionedConfig::V0beta1(v0beta1::StackConfig::default());
//! let upgraded = upgrade_to_latest(old).unwrap();
//! assert_eq!(upgraded.version(), LATEST);
//! ```

pub mod latest;
pub mod v0beta1;
pub mod v1alpha1;
pub mod version;

pub use version::{Channel, SchemaVersion};

use serde::de::DeserializeOwned;

use crate::error::{Result, StackError};

/// Identifier of the newest schema revision.
pub const LATEST: &str = latest::VERSION;

/// Identifier assumed when a descriptor has no `apiVersion`.
pub const OLDEST: &str = v0beta1::VERSION;

/// A descriptor in one specific schema revision.
#[derive(Debug, Clone, PartialEq)]
pub enum VersionedConfig {
    V0beta1(v0beta1::StackConfig),
    V1alpha1(v1alpha1::StackConfig),
    Latest(latest::StackConfig),
}

impl VersionedConfig {
    /// The schema identifier of this value.
    pub fn version(&self) -> &'static str {
        match self {
            Self::V0beta1(_) => v0beta1::VERSION,
            Self::V1alpha1(_) => v1alpha1::VERSION,
            Self::Latest(_) => latest::VERSION,
        }
    }

    /// Produce the next schema revision without touching `self`.
    ///
    /// # Errors
    ///
    /// Returns `NotUpgradable` when called on the latest revision.
    pub fn upgrade(&self) -> Result<VersionedConfig> {
        match self {
            Self::V0beta1(config) => Ok(Self::V1alpha1(config.upgrade())),
            Self::V1alpha1(config) => Ok(Self::Latest(config.upgrade())),
            Self::Latest(_) => Err(StackError::NotUpgradable {
                version: latest::VERSION.to_string(),
            }),
        }
    }

    /// The latest-schema config, if this value is already at the latest revision.
    pub fn into_latest(self) -> Option<latest::StackConfig> {
        match self {
            Self::Latest(config) => Some(config),
            _ => None,
        }
    }

    /// Serialize back to YAML in this revision's own shape.
    pub fn to_yaml(&self) -> Result<String> {
        let yaml = match self {
            Self::V0beta1(config) => serde_yaml::to_string(config),
            Self::V1alpha1(config) => serde_yaml::to_string(config),
            Self::Latest(config) => serde_yaml::to_string(config),
        };
        yaml.map_err(|e| StackError::Other(e.into()))
    }

    /// Serialize to pretty JSON in this revision's own shape.
    pub fn to_json(&self) -> Result<String> {
        let json = match self {
            Self::V0beta1(config) => serde_json::to_string_pretty(config),
            Self::V1alpha1(config) => serde_json::to_string_pretty(config),
            Self::Latest(config) => serde_json::to_string_pretty(config),
        };
        json.map_err(|e| StackError::Other(e.into()))
    }
}

/// A registered schema revision.
#[derive(Debug, Clone, Copy)]
pub struct Version {
    /// The `apiVersion` identifier.
    pub api_version: &'static str,
    /// Build an empty config of this revision.
    pub factory: fn() -> VersionedConfig,
    /// Strictly decode a YAML mapping into this revision.
    pub decode: fn(serde_yaml::Value) -> Result<VersionedConfig>,
}

/// All supported revisions, oldest first. The last entry is [`LATEST`].
pub static VERSIONS: &[Version] = &[
    Version {
        api_version: v0beta1::VERSION,
        factory: new_v0beta1,
        decode: decode_v0beta1,
    },
    Version {
        api_version: v1alpha1::VERSION,
        factory: new_v1alpha1,
        decode: decode_v1alpha1,
    },
    Version {
        api_version: latest::VERSION,
        factory: new_latest,
        decode: decode_latest,
    },
];

fn new_v0beta1() -> VersionedConfig {
    VersionedConfig::V0beta1(v0beta1::StackConfig::default())
}

fn new_v1alpha1() -> VersionedConfig {
    VersionedConfig::V1alpha1(v1alpha1::StackConfig {
        api_version: v1alpha1::VERSION.to_string(),
        ..Default::default()
    })
}

fn new_latest() -> VersionedConfig {
    VersionedConfig::Latest(latest::StackConfig {
        api_version: latest::VERSION.to_string(),
        ..Default::default()
    })
}

fn decode_v0beta1(value: serde_yaml::Value) -> Result<VersionedConfig> {
    strict_decode(value).map(VersionedConfig::V0beta1)
}

fn decode_v1alpha1(value: serde_yaml::Value) -> Result<VersionedConfig> {
    strict_decode(value).map(VersionedConfig::V1alpha1)
}

fn decode_latest(value: serde_yaml::Value) -> Result<VersionedConfig> {
    strict_decode(value).map(VersionedConfig::Latest)
}

/// Look up a registered revision by identifier.
pub fn find(api_version: &str) -> Option<&'static Version> {
    VERSIONS.iter().find(|v| v.api_version == api_version)
}

fn strict_decode<T: DeserializeOwned>(value: serde_yaml::Value) -> Result<T> {
    serde_yaml::from_value(value).map_err(|e| StackError::SchemaError {
        message: e.to_string(),
    })
}

/// Upgrade a config to the latest schema revision.
///
/// Returns the input unchanged when it is already at the latest revision.
///
/// # Errors
///
/// - `InvalidVersion` if either identifier cannot be parsed
/// - `TooNew` if the config is newer than the latest known revision
/// - `InvalidUpgrade` if an upgrade step fails to advance the version
pub fn upgrade_to_latest(config: VersionedConfig) -> Result<VersionedConfig> {
    upgrade_chain(config, LATEST, VersionedConfig::upgrade)
}

/// Walk `config` towards `target` with `step`, checking that every step
/// moves strictly forward.
fn upgrade_chain<F>(config: VersionedConfig, target: &str, step: F) -> Result<VersionedConfig>
where
    F: Fn(&VersionedConfig) -> Result<VersionedConfig>,
{
    let current = SchemaVersion::parse(config.version())?;
    let goal = SchemaVersion::parse(target)?;

    if current == goal {
        return Ok(config);
    }
    if current > goal {
        return Err(StackError::TooNew {
            version: config.version().to_string(),
        });
    }

    let mut config = config;
    let mut steps = 0;
    while config.version() != target {
        let from = SchemaVersion::parse(config.version())?;
        let next = step(&config)?;
        let to = SchemaVersion::parse(next.version())?;

        steps += 1;
        if to <= from || steps >= VERSIONS.len() {
            return Err(StackError::InvalidUpgrade {
                from: config.version().to_string(),
                to: next.version().to_string(),
            });
        }

        tracing::debug!("Upgraded stack config {} -> {}", config.version(), next.version());
        config = next;
    }

    Ok(config)
}
