//! Interactive terminal UI.

use console::Term;
use dialoguer::Confirm;
use std::io::Write;

use crate::error::{Result, StackError};

use super::{should_use_colors, NonInteractiveUI, OutputMode, Prompt, StackTheme, UserInterface};

/// Interactive terminal UI implementation.
pub struct TerminalUI {
    term: Term,
    theme: StackTheme,
    mode: OutputMode,
    assume_yes: bool,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode) -> Self {
        let theme = if should_use_colors() {
            StackTheme::new()
        } else {
            StackTheme::plain()
        };

        Self {
            term: Term::stdout(),
            theme,
            mode,
            assume_yes: false,
        }
    }

    /// Answer every confirmation with "yes" without asking.
    pub fn assume_yes(mut self, assume_yes: bool) -> Self {
        self.assume_yes = assume_yes;
        self
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_progress() {
            writeln!(self.term, "{}", msg).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_success(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            Term::stderr()
                .write_line(&self.theme.format_warning(msg))
                .ok();
        }
    }

    fn error(&mut self, msg: &str) {
        Term::stderr().write_line(&self.theme.format_error(msg)).ok();
    }

    fn data(&mut self, text: &str) {
        writeln!(self.term, "{}", text.trim_end()).ok();
    }

    fn confirm(&mut self, prompt: &Prompt) -> Result<bool> {
        if self.assume_yes {
            tracing::debug!("Assuming yes for '{}'", prompt.key);
            return Ok(true);
        }

        Confirm::new()
            .with_prompt(format!(
                "{} - are you sure you want to proceed?",
                self.theme.highlight.apply_to(&prompt.question)
            ))
            .default(prompt.default)
            .interact_on(&self.term)
            .map_err(|e| StackError::Io(e.into()))
    }

    fn is_interactive(&self) -> bool {
        self.term.is_term()
    }
}

/// Create the appropriate UI based on context.
pub fn create_ui(interactive: bool, assume_yes: bool, mode: OutputMode) -> Box<dyn UserInterface> {
    if interactive && Term::stdout().is_term() {
        Box::new(TerminalUI::new(mode).assume_yes(assume_yes))
    } else {
        Box::new(NonInteractiveUI::new(mode).assume_yes(assume_yes))
    }
}
