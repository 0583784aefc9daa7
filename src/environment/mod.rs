//! Environment activation and resolution.
//!
//! Determines which configured environment is active. An environment is
//! active when:
//!
//! 1. The current kubectl context is one of its `||`-joined candidates
//! 2. Its optional `env` predicate (`KEY=VALUE`) holds in the process environment
//!
//! At most one environment may be active at a time.

pub mod activation;
pub mod context;
pub mod resolver;

pub use activation::{context_matches, env_matches, is_active, is_build_active, process_env};
pub use context::{ContextProvider, FixedContext, KubectlContext};
pub use resolver::{
    find_environment, resolve_active, resolve_build, switch_to, validate, SwitchOutcome,
};
