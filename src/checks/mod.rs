//! Declarative checks and their results.
//!
//! A [`Control`] names a subject (a package or a service) and the
//! [`Expectation`]s it must meet. Running a control against a probe yields a
//! [`DescribeResult`] with one [`CheckResult`] per expectation. Controls are
//! independent: a failure or probe error in one never stops the next.
//!
//! # Modules
//!
//! - [`package`] - Package assertions
//! - [`service`] - Service assertions
//! - [`profile`] - The docker host profile
//!
//! # Example
//!
//! ```
//! use hostspec::checks::DockerProfile;
//! use hostspec::config::CheckConfig;
//! use hostspec::probe::{FakeHost, PackageInfo, ServiceInfo};
//!
//! let host = FakeHost::new()
//!     .with_package(PackageInfo::installed("docker-engine", "17.03.2-ce"))
//!     .with_service(ServiceInfo::new("docker", true, true, true));
//!
//! let report = DockerProfile::new(CheckConfig::new("17.03.2")).run(&host, &host);
//! assert!(report.success());
//! assert_eq!(report.passed(), 5);
//! ```

pub mod package;
pub mod profile;
pub mod service;

pub use package::{check_package, package_control};
pub use profile::DockerProfile;
pub use service::{check_service, service_control};

use std::fmt;

use serde::Serialize;

/// What a control inspects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subject {
    /// A package in the host package database.
    Package(String),
    /// A service known to the host service manager.
    Service(String),
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::Package(name) => write!(f, "Package {}", name),
            Subject::Service(name) => write!(f, "Service {}", name),
        }
    }
}

/// A single assertion about a subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expectation {
    /// The subject is installed.
    Installed,
    /// The service starts at boot.
    Enabled,
    /// The service is currently running.
    Running,
    /// The package version contains this substring.
    VersionIncludes(String),
}

impl Expectation {
    /// Human-readable form, e.g. `should be installed`.
    pub fn description(&self) -> String {
        match self {
            Expectation::Installed => "should be installed".to_string(),
            Expectation::Enabled => "should be enabled".to_string(),
            Expectation::Running => "should be running".to_string(),
            Expectation::VersionIncludes(expected) => {
                format!("version should include {:?}", expected)
            }
        }
    }
}

/// A subject plus the expectations it must meet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub subject: Subject,
    pub expectations: Vec<Expectation>,
}

/// Outcome of one assertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CheckStatus {
    Passed,
    Failed { reason: String },
}

impl CheckStatus {
    /// Build a failure with a reason.
    pub fn failed(reason: impl Into<String>) -> Self {
        CheckStatus::Failed {
            reason: reason.into(),
        }
    }

    /// Whether the assertion passed.
    pub fn is_passed(&self) -> bool {
        matches!(self, CheckStatus::Passed)
    }
}

/// One evaluated expectation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub description: String,
    #[serde(flatten)]
    pub status: CheckStatus,
}

/// All results for one control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DescribeResult {
    pub subject: String,
    pub results: Vec<CheckResult>,
}

impl DescribeResult {
    /// Evaluate every expectation of `control` with `evaluate`.
    pub fn evaluate<F>(control: &Control, mut evaluate: F) -> Self
    where
        F: FnMut(&Expectation) -> CheckStatus,
    {
        let results = control
            .expectations
            .iter()
            .map(|expectation| CheckResult {
                description: expectation.description(),
                status: evaluate(expectation),
            })
            .collect();
        Self {
            subject: control.subject.to_string(),
            results,
        }
    }

    /// Fail every expectation of `control` with the same reason.
    ///
    /// Used when the probe itself could not answer.
    pub fn all_failed(control: &Control, reason: &str) -> Self {
        Self::evaluate(control, |_| CheckStatus::failed(reason))
    }

    /// Look up a result by its description.
    pub fn result(&self, description: &str) -> Option<&CheckResult> {
        self.results.iter().find(|r| r.description == description)
    }

    /// Whether every assertion in this control passed.
    pub fn success(&self) -> bool {
        self.results.iter().all(|r| r.status.is_passed())
    }
}

/// Results of a whole profile run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub controls: Vec<DescribeResult>,
}

impl RunReport {
    /// Total number of assertions.
    pub fn total(&self) -> usize {
        self.controls.iter().map(|c| c.results.len()).sum()
    }

    /// Number of passed assertions.
    pub fn passed(&self) -> usize {
        self.controls
            .iter()
            .flat_map(|c| &c.results)
            .filter(|r| r.status.is_passed())
            .count()
    }

    /// Number of failed assertions.
    pub fn failed(&self) -> usize {
        self.total() - self.passed()
    }

    /// Whether every assertion passed.
    pub fn success(&self) -> bool {
        self.failed() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service_control() -> Control {
        Control {
            subject: Subject::Service("docker".to_string()),
            expectations: vec![
                Expectation::Installed,
                Expectation::Enabled,
                Expectation::Running,
            ],
        }
    }

    #[test]
    fn subject_display() {
        assert_eq!(
            Subject::Package("docker-engine".into()).to_string(),
            "Package docker-engine"
        );
        assert_eq!(Subject::Service("docker".into()).to_string(), "Service docker");
    }

    #[test]
    fn expectation_descriptions() {
        assert_eq!(Expectation::Installed.description(), "should be installed");
        assert_eq!(Expectation::Enabled.description(), "should be enabled");
        assert_eq!(Expectation::Running.description(), "should be running");
        assert_eq!(
            Expectation::VersionIncludes("17.03.2".into()).description(),
            "version should include \"17.03.2\""
        );
    }

    #[test]
    fn evaluate_produces_one_result_per_expectation() {
        let result = DescribeResult::evaluate(&service_control(), |e| match e {
            Expectation::Enabled => CheckStatus::failed("disabled"),
            _ => CheckStatus::Passed,
        });
        assert_eq!(result.subject, "Service docker");
        assert_eq!(result.results.len(), 3);
        assert!(!result.success());
        assert!(result.result("should be installed").unwrap().status.is_passed());
        assert_eq!(
            result.result("should be enabled").unwrap().status,
            CheckStatus::failed("disabled")
        );
    }

    #[test]
    fn all_failed_uses_same_reason() {
        let result = DescribeResult::all_failed(&service_control(), "no init system");
        assert!(result
            .results
            .iter()
            .all(|r| r.status == CheckStatus::failed("no init system")));
    }

    #[test]
    fn report_counts() {
        let report = RunReport {
            controls: vec![
                DescribeResult::evaluate(&service_control(), |_| CheckStatus::Passed),
                DescribeResult::all_failed(&service_control(), "boom"),
            ],
        };
        assert_eq!(report.total(), 6);
        assert_eq!(report.passed(), 3);
        assert_eq!(report.failed(), 3);
        assert!(!report.success());
    }

    #[test]
    fn empty_report_is_success() {
        assert!(RunReport::default().success());
    }

    #[test]
    fn check_result_serializes_flat() {
        let result = CheckResult {
            description: "should be running".into(),
            status: CheckStatus::failed("inactive"),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["reason"], "inactive");
        assert_eq!(json["description"], "should be running");
    }
}
