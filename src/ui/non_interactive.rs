//! Non-interactive UI for CI/headless environments.

use std::collections::HashMap;

use crate::error::{Result, StackError};

use super::{parse_answer, OutputMode, Prompt, UserInterface};

/// Prefix of environment variables that answer confirmations by key.
pub const CONFIRM_ENV_PREFIX: &str = "STACK_CONFIRM_";

/// UI implementation for non-interactive mode.
///
/// Confirmations cannot be asked. They are answered by `--yes`, or by a
/// `STACK_CONFIRM_<KEY>` variable, and otherwise fail with
/// `ConfirmationRequired`.
pub struct NonInteractiveUI {
    mode: OutputMode,
    assume_yes: bool,
    env_overrides: HashMap<String, String>,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        let env_overrides: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with(CONFIRM_ENV_PREFIX))
            .collect();

        Self {
            mode,
            assume_yes: false,
            env_overrides,
        }
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            assume_yes: false,
            env_overrides: overrides,
        }
    }

    /// Answer every confirmation with "yes".
    pub fn assume_yes(mut self, assume_yes: bool) -> Self {
        self.assume_yes = assume_yes;
        self
    }

    fn override_key(prompt: &Prompt) -> String {
        format!(
            "{}{}",
            CONFIRM_ENV_PREFIX,
            prompt.key.to_uppercase().replace('-', "_")
        )
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_progress() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("⚠ {}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn data(&mut self, text: &str) {
        println!("{}", text.trim_end());
    }

    fn confirm(&mut self, prompt: &Prompt) -> Result<bool> {
        if self.assume_yes {
            return Ok(true);
        }

        let env_key = Self::override_key(prompt);
        if let Some(answer) = self.env_overrides.get(&env_key).and_then(|v| parse_answer(v)) {
            tracing::debug!("Answered '{}' from {}", prompt.key, env_key);
            return Ok(answer);
        }

        Err(StackError::ConfirmationRequired {
            question: prompt.question.clone(),
        })
    }

    fn is_interactive(&self) -> bool {
        false
    }
}
