//! Service assertions.

use crate::probe::{ServiceInfo, ServiceProbe};

use super::{CheckStatus, Control, DescribeResult, Expectation, Subject};

/// Control for a service that must be installed, enabled and running.
pub fn service_control(name: &str) -> Control {
    Control {
        subject: Subject::Service(name.to_string()),
        expectations: vec![
            Expectation::Installed,
            Expectation::Enabled,
            Expectation::Running,
        ],
    }
}

/// Query `name` and evaluate the service control against it.
///
/// Each flag is judged on its own; a probe error fails all three.
pub fn check_service(probe: &dyn ServiceProbe, name: &str) -> DescribeResult {
    let control = service_control(name);
    match probe.service(name) {
        Ok(info) => DescribeResult::evaluate(&control, |e| evaluate(&info, e)),
        Err(e) => {
            tracing::warn!("Service probe for {} failed: {}", name, e);
            DescribeResult::all_failed(&control, &e.to_string())
        }
    }
}

fn evaluate(info: &ServiceInfo, expectation: &Expectation) -> CheckStatus {
    let (ok, reason) = match expectation {
        Expectation::Installed => (info.installed, "service is not installed"),
        Expectation::Enabled => (info.enabled, "service is not enabled"),
        Expectation::Running => (info.running, "service is not running"),
        Expectation::VersionIncludes(_) => (false, "not applicable to services"),
    };
    if ok {
        CheckStatus::Passed
    } else {
        CheckStatus::failed(reason)
    }
}
