//! Terminal UI.

use console::Term;
use std::io::Write;

use super::{should_use_colors, GcrTheme, OutputMode, UserInterface};

/// Terminal UI implementation.
///
/// Status goes to stdout; warnings and errors go to stderr so that JSON
/// written to stdout stays parseable.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: GcrTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode) -> Self {
        let theme = if should_use_colors() {
            GcrTheme::new()
        } else {
            GcrTheme::plain()
        };

        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme,
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn message(&mut self, msg: &str) {
        if self.mode.shows_progress() {
            writeln!(self.out, "{}", msg).ok();
        }
    }

    fn output(&mut self, text: &str) {
        writeln!(self.out, "{}", text).ok();
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "{}", self.theme.format_success(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.err, "{}", self.theme.format_warning(msg)).ok();
        }
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_error(msg)).ok();
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_progress() {
            writeln!(self.out, "{}", self.theme.format_header(title)).ok();
        }
    }
}
