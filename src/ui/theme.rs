//! Visual theme and styling.

use std::ffi::OsStr;

use console::{Style, Term};

/// hostspec's visual theme.
#[derive(Debug, Clone)]
pub struct HostspecTheme {
    /// Style for passing assertions (green).
    pub success: Style,
    /// Style for warnings (orange).
    pub warning: Style,
    /// Style for failures and fatal errors (red bold).
    pub error: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    /// Style for control subjects (bold).
    pub subject: Style,
    /// Style for headers (bold cyan).
    pub header: Style,
}

impl Default for HostspecTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl HostspecTheme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
            subject: Style::new().bold(),
            header: Style::new().bold().cyan(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            dim: Style::new(),
            subject: Style::new(),
            header: Style::new(),
        }
    }

    fn forced(self) -> Self {
        Self {
            success: self.success.force_styling(true),
            warning: self.warning.force_styling(true),
            error: self.error.force_styling(true),
            dim: self.dim.force_styling(true),
            subject: self.subject.force_styling(true),
            header: self.header.force_styling(true),
        }
    }

    /// Format a warning message (icon + text in orange).
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format a control subject line.
    pub fn format_subject(&self, subject: &str) -> String {
        format!("{}", self.subject.apply_to(subject))
    }

    /// Format a header banner.
    pub fn format_header(&self, title: &str) -> String {
        format!("{} {}", self.header.apply_to("Profile:"), title)
    }
}

/// Check if colors should be enabled on stdout.
pub fn should_use_colors() -> bool {
    should_use_colors_for(&Term::stdout())
}

/// Check if colors should be enabled on `term`.
pub fn should_use_colors_for(term: &Term) -> bool {
    colors_enabled(std::env::var_os("NO_COLOR").as_deref(), term.is_term())
}

/// Colors are on for a terminal unless `NO_COLOR` holds a non-empty value
/// (https://no-color.org/).
pub fn colors_enabled(no_color: Option<&OsStr>, is_term: bool) -> bool {
    let disabled = no_color.is_some_and(|value| !value.is_empty());
    is_term && !disabled
}

/// Pick the colored or plain theme.
///
/// A colored theme always emits escapes. console otherwise decides from
/// stdout alone, which is wrong for text written to stderr.
pub fn theme_for(use_color: bool) -> HostspecTheme {
    if use_color {
        HostspecTheme::new().forced()
    } else {
        HostspecTheme::plain()
    }
}
