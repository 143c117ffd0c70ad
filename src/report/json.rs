//! JSON report formatter.
//!
//! Formats check results as machine-readable JSON for tooling integration.

use super::ReportFormatter;
use crate::checks::{profile::PROFILE_NAME, DescribeResult, RunReport};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

/// Formats check results as JSON.
pub struct JsonFormatter {
    checked_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    profile: &'a str,
    checked_at: String,
    controls: &'a [DescribeResult],
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonSummary {
    total: usize,
    passed: usize,
    failed: usize,
}

impl JsonFormatter {
    /// Create a formatter stamped with the current time.
    pub fn new() -> Self {
        Self::with_timestamp(Utc::now())
    }

    /// Create a formatter with a fixed timestamp.
    pub fn with_timestamp(checked_at: DateTime<Utc>) -> Self {
        Self { checked_at }
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonFormatter {
    fn format<W: Write>(&self, report: &RunReport, writer: &mut W) -> std::io::Result<()> {
        let output = JsonOutput {
            profile: PROFILE_NAME,
            checked_at: self.checked_at.to_rfc3339(),
            controls: &report.controls,
            summary: JsonSummary {
                total: report.total(),
                passed: report.passed(),
                failed: report.failed(),
            },
        };

        serde_json::to_writer_pretty(&mut *writer, &output)?;
        writeln!(writer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::{CheckResult, CheckStatus};
    use chrono::TimeZone;

    fn report() -> RunReport {
        RunReport {
            controls: vec![DescribeResult {
                subject: "Service docker".into(),
                results: vec![
                    CheckResult {
                        description: "should be installed".into(),
                        status: CheckStatus::Passed,
                    },
                    CheckResult {
                        description: "should be enabled".into(),
                        status: CheckStatus::failed("service is not enabled"),
                    },
                ],
            }],
        }
    }

    #[test]
    fn renders_controls_and_summary() {
        let timestamp = Utc.with_ymd_and_hms(2017, 3, 2, 12, 0, 0).unwrap();
        let output = JsonFormatter::with_timestamp(timestamp)
            .render(&report())
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(json["profile"], "docker");
        assert_eq!(json["checked_at"], "2017-03-02T12:00:00+00:00");
        assert_eq!(json["controls"][0]["subject"], "Service docker");
        assert_eq!(json["controls"][0]["results"][0]["status"], "passed");
        assert!(json["controls"][0]["results"][0].get("reason").is_none());
        assert_eq!(json["controls"][0]["results"][1]["status"], "failed");
        assert_eq!(
            json["controls"][0]["results"][1]["reason"],
            "service is not enabled"
        );
        assert_eq!(json["summary"]["total"], 2);
        assert_eq!(json["summary"]["passed"], 1);
        assert_eq!(json["summary"]["failed"], 1);
    }
}
