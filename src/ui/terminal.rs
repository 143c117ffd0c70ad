//! Terminal UI.

use console::Term;
use std::io::Write;

use super::{should_use_colors_for, theme_for, HostspecTheme, OutputMode, UserInterface};

/// Terminal UI implementation.
///
/// Status goes to stdout; warnings and errors go to stderr so a failed
/// precondition is visible even when stdout is captured. Each stream is
/// colored according to whether it is itself a terminal.
pub struct TerminalUI {
    out: Term,
    err: Term,
    out_theme: HostspecTheme,
    err_theme: HostspecTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode) -> Self {
        let out_color = should_use_colors_for(&Term::stdout());
        let err_color = should_use_colors_for(&Term::stderr());
        Self::with_colors(mode, out_color, err_color)
    }

    fn with_colors(mode: OutputMode, out_color: bool, err_color: bool) -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            out_theme: theme_for(out_color),
            err_theme: theme_for(err_color),
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        writeln!(self.out, "{}", msg).ok();
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.err, "{}", self.err_theme.format_warning(msg)).ok();
        }
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.err_theme.format_error(msg)).ok();
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "\n{}\n", self.out_theme.format_header(title)).ok();
        }
    }

    fn data(&mut self, text: &str) {
        writeln!(self.out, "{}", text).ok();
    }
}

/// Create the UI for the given output mode.
pub fn create_ui(mode: OutputMode) -> Box<dyn UserInterface> {
    Box::new(TerminalUI::new(mode))
}
