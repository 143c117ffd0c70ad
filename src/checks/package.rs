//! Package assertions.

use crate::probe::{PackageInfo, PackageProbe};

use super::{CheckStatus, Control, DescribeResult, Expectation, Subject};

/// Control for a package that must be installed at a version containing
/// `expected_version`.
pub fn package_control(name: &str, expected_version: &str) -> Control {
    Control {
        subject: Subject::Package(name.to_string()),
        expectations: vec![
            Expectation::Installed,
            Expectation::VersionIncludes(expected_version.to_string()),
        ],
    }
}

/// Query `name` and evaluate the package control against it.
///
/// A probe error fails every assertion with the error as the reason.
pub fn check_package(
    probe: &dyn PackageProbe,
    name: &str,
    expected_version: &str,
) -> DescribeResult {
    let control = package_control(name, expected_version);
    match probe.package(name) {
        Ok(info) => DescribeResult::evaluate(&control, |e| evaluate(&info, e)),
        Err(e) => {
            tracing::warn!("Package probe for {} failed: {}", name, e);
            DescribeResult::all_failed(&control, &e.to_string())
        }
    }
}

fn evaluate(info: &PackageInfo, expectation: &Expectation) -> CheckStatus {
    match expectation {
        Expectation::Installed if info.installed => CheckStatus::Passed,
        Expectation::Installed => CheckStatus::failed("package is not installed"),
        Expectation::VersionIncludes(expected) => match (&info.version, info.installed) {
            (Some(version), true) if version.contains(expected.as_str()) => CheckStatus::Passed,
            (Some(version), true) => CheckStatus::failed(format!(
                "expected {:?} to include {:?}",
                version, expected
            )),
            _ => CheckStatus::failed("package is not installed, no version to compare"),
        },
        Expectation::Enabled | Expectation::Running => {
            CheckStatus::failed("not applicable to packages")
        }
    }
}
