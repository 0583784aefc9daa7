//! Platform detection.

/// Check if running in a CI environment.
///
/// Used to force non-interactive mode in `main()`. Checks common CI
/// environment variables: `CI`, `GITHUB_ACTIONS`, `GITLAB_CI`,
/// `CIRCLECI`, `TRAVIS`, `JENKINS_URL`, `BUILDKITE`.
pub fn is_ci() -> bool {
    is_ci_with_env(|key| std::env::var(key).ok())
}

/// Check for CI with a custom env var lookup (for testing).
pub fn is_ci_with_env<F>(lookup: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    const CI_VARS: &[&str] = &[
        "CI",
        "GITHUB_ACTIONS",
        "GITLAB_CI",
        "CIRCLECI",
        "TRAVIS",
        "JENKINS_URL",
        "BUILDKITE",
    ];
    CI_VARS.iter().any(|var| lookup(var).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_ci_variables() {
        assert!(is_ci_with_env(|k| (k == "GITHUB_ACTIONS").then(|| "true".to_string())));
        assert!(is_ci_with_env(|k| (k == "CI").then(String::new)));
    }

    #[test]
    fn no_variables_means_not_ci() {
        assert!(!is_ci_with_env(|_| None));
    }
}
