//! The docker host profile.
//!
//! Two controls, run in order: the docker package at the expected version,
//! then the docker service installed, enabled and running.

use crate::config::CheckConfig;
use crate::probe::{PackageProbe, ServiceProbe};

use super::{check_package, check_service, package_control, service_control, Control, RunReport};

/// Name reported for this profile in output.
pub const PROFILE_NAME: &str = "docker";

/// Checks a host against the docker profile.
#[derive(Debug, Clone)]
pub struct DockerProfile {
    config: CheckConfig,
}

impl DockerProfile {
    /// Create a profile from validated configuration.
    pub fn new(config: CheckConfig) -> Self {
        Self { config }
    }

    /// The configuration this profile checks against.
    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// The controls this profile runs, without probing anything.
    pub fn controls(&self) -> Vec<Control> {
        vec![
            package_control(&self.config.package, &self.config.expected_version),
            service_control(&self.config.service),
        ]
    }

    /// Run every control. Each control is evaluated even if an earlier one
    /// failed.
    pub fn run(&self, packages: &dyn PackageProbe, services: &dyn ServiceProbe) -> RunReport {
        let controls = vec![
            check_package(
                packages,
                &self.config.package,
                &self.config.expected_version,
            ),
            check_service(services, &self.config.service),
        ];
        let report = RunReport { controls };

        tracing::info!(
            "Profile {}: {} passed, {} failed",
            PROFILE_NAME,
            report.passed(),
            report.failed()
        );
        report
    }
}
