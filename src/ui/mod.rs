//! User interface.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for interactive terminal usage
//! - [`NonInteractiveUI`] for CI/headless environments
//! - [`MockUI`] for tests
//!
//! # Example
//!
//! ```
//! use stack::ui::{create_ui, OutputMode};
//!
//! // Use non-interactive mode for testability
//! let mut ui = create_ui(false, false, OutputMode::Quiet);
//! ui.success("Stack is up");
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, StackTheme};

use crate::error::Result;

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Write command output (JSON, YAML) to stdout, whatever the output mode.
    fn data(&mut self, text: &str);

    /// Ask a yes/no question.
    ///
    /// Implementations that cannot ask return `ConfirmationRequired`.
    fn confirm(&mut self, prompt: &Prompt) -> Result<bool>;

    /// Check if running in interactive mode.
    fn is_interactive(&self) -> bool;
}

/// A yes/no question.
#[derive(Debug, Clone)]
pub struct Prompt {
    /// Unique key for the prompt (used for overrides and test responses).
    pub key: String,
    /// The question to display.
    pub question: String,
    /// Answer used when the user just presses enter.
    pub default: bool,
}

impl Prompt {
    /// A confirmation that defaults to "no".
    pub fn confirm(key: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            question: question.into(),
            default: false,
        }
    }
}

/// Interpret a typed answer as yes/no.
pub fn parse_answer(answer: &str) -> Option<bool> {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" | "true" | "1" => Some(true),
        "n" | "no" | "false" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirm_prompt_defaults_to_no() {
        let prompt = Prompt::confirm("destroy", "You are about to destroy pods");
        assert_eq!(prompt.key, "destroy");
        assert!(!prompt.default);
    }

    #[test]
    fn parse_answer_accepts_common_forms() {
        for yes in ["y", "Y", "yes", "Yes", "YES", "true"] {
            assert_eq!(parse_answer(yes), Some(true), "{}", yes);
        }
        for no in ["n", "N", "no", "No", "NO", "false"] {
            assert_eq!(parse_answer(no), Some(false), "{}", no);
        }
        assert_eq!(parse_answer("maybe"), None);
    }
}
