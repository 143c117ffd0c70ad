//! Report formatters.
//!
//! This module renders a [`RunReport`] for people (with optional color) or
//! for tools (JSON).

pub mod human;
pub mod json;

use crate::checks::RunReport;
use std::io::Write;

/// Trait for formatting check results.
pub trait ReportFormatter {
    /// Format a report to the given writer.
    fn format<W: Write>(&self, report: &RunReport, writer: &mut W) -> std::io::Result<()>;

    /// Format a report into a string.
    fn render(&self, report: &RunReport) -> std::io::Result<String> {
        let mut buf = Vec::new();
        self.format(report, &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

pub use human::HumanFormatter;
pub use json::JsonFormatter;
