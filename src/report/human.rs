//! Human-readable report formatter.
//!
//! ```text
//! Package docker-engine
//!   ✓  should be installed
//!   ✗  version should include "17.03.2"
//!      expected "17.04.0-ce" to include "17.03.2"
//!
//! Test Summary: 1 successful, 1 failure
//! ```

use super::ReportFormatter;
use crate::checks::{CheckStatus, RunReport};
use crate::ui::{theme_for, HostspecTheme};
use std::io::Write;

/// Formats results for terminal display.
pub struct HumanFormatter {
    theme: HostspecTheme,
    /// Whether passing assertions are listed.
    pub show_passes: bool,
}

impl HumanFormatter {
    /// Create a new human formatter.
    pub fn new(use_color: bool) -> Self {
        Self {
            theme: theme_for(use_color),
            show_passes: true,
        }
    }

    /// Only list failed assertions (the summary is always written).
    pub fn failures_only(mut self) -> Self {
        self.show_passes = false;
        self
    }

    fn summary(&self, report: &RunReport) -> String {
        let failed = report.failed();
        let text = format!(
            "Test Summary: {} successful, {} {}",
            report.passed(),
            failed,
            if failed == 1 { "failure" } else { "failures" }
        );
        if failed == 0 {
            format!("{}", self.theme.success.apply_to(text))
        } else {
            format!("{}", self.theme.error.apply_to(text))
        }
    }
}

impl ReportFormatter for HumanFormatter {
    fn format<W: Write>(&self, report: &RunReport, writer: &mut W) -> std::io::Result<()> {
        for control in &report.controls {
            if !self.show_passes && control.success() {
                continue;
            }

            writeln!(writer, "{}", self.theme.format_subject(&control.subject))?;
            for result in &control.results {
                match &result.status {
                    CheckStatus::Passed if self.show_passes => {
                        writeln!(
                            writer,
                            "  {}",
                            self.theme
                                .success
                                .apply_to(format!("✓  {}", result.description))
                        )?;
                    }
                    CheckStatus::Passed => {}
                    CheckStatus::Failed { reason } => {
                        writeln!(
                            writer,
                            "  {}",
                            self.theme
                                .error
                                .apply_to(format!("✗  {}", result.description))
                        )?;
                        writeln!(writer, "     {}", self.theme.dim.apply_to(reason))?;
                    }
                }
            }
            writeln!(writer)?;
        }

        writeln!(writer, "{}", self.summary(report))?;
        Ok(())
    }
}
