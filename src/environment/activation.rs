//! Activation predicates.
//!
//! An environment is active when the current kubectl context is one of its
//! `||`-joined candidates and its optional `KEY=VALUE` predicate holds in
//! the process environment. Build agents have no cluster context, so the
//! build-time check looks at the `env` predicate alone.

use crate::error::{Result, StackError};
use crate::schema::latest::EnvironmentDescription;

/// Look up a variable in the real process environment.
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Whether `current` is one of the environment's context candidates.
///
/// A missing or blank current context matches nothing.
pub fn context_matches(environment: &EnvironmentDescription, current: Option<&str>) -> bool {
    let Some(current) = current.map(str::trim).filter(|c| !c.is_empty()) else {
        return false;
    };
    environment.activation.contexts().contains(&current)
}

/// Split an `env` predicate into key and expected value.
///
/// # Errors
///
/// Returns `InvalidActivation` when there is no `=` or the key is blank.
pub fn parse_env_predicate<'a>(
    environment: &EnvironmentDescription,
    predicate: &'a str,
) -> Result<(&'a str, &'a str)> {
    match predicate.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value)),
        _ => Err(StackError::InvalidActivation {
            environment: environment.name.clone(),
            value: predicate.to_string(),
        }),
    }
}

/// Whether the environment's `env` predicate holds.
///
/// No predicate means true. An unset variable compares as the empty string.
pub fn env_matches<F>(environment: &EnvironmentDescription, lookup: F) -> Result<bool>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(predicate) = environment.activation.env_predicate() else {
        return Ok(true);
    };
    let (key, value) = parse_env_predicate(environment, predicate)?;
    Ok(lookup(key).unwrap_or_default() == value)
}

/// Context and `env` predicate both hold.
pub fn is_active<F>(
    environment: &EnvironmentDescription,
    current: Option<&str>,
    lookup: F,
) -> Result<bool>
where
    F: Fn(&str) -> Option<String>,
{
    if !context_matches(environment, current) {
        return Ok(false);
    }
    env_matches(environment, lookup)
}

/// Build-time activation: the `env` predicate alone decides.
pub fn is_build_active<F>(environment: &EnvironmentDescription, lookup: F) -> Result<bool>
where
    F: Fn(&str) -> Option<String>,
{
    env_matches(environment, lookup)
}
