//! Terminal output.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for real terminals and pipes
//! - [`MockUI`] for capturing output in tests
//!
//! # Example
//!
//! ```
//! use hostspec::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.show_header("docker");
//! ui.message("Test Summary: 5 successful, 0 failures");
//! assert!(ui.has_message("5 successful"));
//! ```

pub mod mock;
pub mod output;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use output::OutputMode;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{colors_enabled, should_use_colors, should_use_colors_for, theme_for, HostspecTheme};

/// Trait for user-facing output.
///
/// This trait allows capturing output in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a message to the user. Shown in every output mode; callers
    /// filter by [`OutputMode`] themselves.
    fn message(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message. Shown in every output mode.
    fn error(&mut self, msg: &str);

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Write machine-readable output (e.g. JSON) verbatim, in every output
    /// mode.
    fn data(&mut self, text: &str);
}
