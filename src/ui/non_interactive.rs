//! Non-interactive UI for CI/headless environments.

use super::report::format_outcome;
use super::theme::PreflightTheme;
use super::{OutputMode, ProgressSpinner, SpinnerHandle, UserInterface};
use crate::checks::CheckOutcome;

/// UI implementation for piped output and CI logs.
///
/// No colors and no spinner; status goes to stdout, errors to stderr.
pub struct NonInteractiveUI {
    mode: OutputMode,
    theme: PreflightTheme,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            theme: PreflightTheme::plain(),
        }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        println!("{}", msg);
    }

    fn success(&mut self, msg: &str) {
        println!("{}", self.theme.format_success(msg));
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }

    fn start_spinner(&mut self, _message: &str) -> Box<dyn SpinnerHandle> {
        Box::new(ProgressSpinner::hidden())
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_decoration() {
            println!("=== {} ===", title);
        }
    }

    fn show_outcome(&mut self, outcome: &CheckOutcome, show_fixes: bool) {
        for line in format_outcome(&self.theme, outcome, show_fixes) {
            println!("{}", line);
        }
    }
}
