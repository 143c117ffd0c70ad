//! In-memory host for testing.
//!
//! `FakeHost` implements both probe traits from fixed snapshots. Unknown
//! packages are reported as not installed and unknown services as absent,
//! matching what the real probes say for names the host has never seen.

use std::collections::HashMap;

use crate::error::{HostspecError, Result};

use super::{PackageInfo, PackageProbe, ServiceInfo, ServiceProbe};

/// Fake host with pre-configured packages and services.
#[derive(Debug, Default, Clone)]
pub struct FakeHost {
    packages: HashMap<String, PackageInfo>,
    services: HashMap<String, ServiceInfo>,
    package_error: Option<String>,
    service_error: Option<String>,
}

impl FakeHost {
    /// Create a host with nothing installed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a package snapshot.
    pub fn with_package(mut self, info: PackageInfo) -> Self {
        self.packages.insert(info.name.clone(), info);
        self
    }

    /// Add a service snapshot.
    pub fn with_service(mut self, info: ServiceInfo) -> Self {
        self.services.insert(info.name.clone(), info);
        self
    }

    /// Make every package query fail with `message`.
    pub fn failing_packages(mut self, message: &str) -> Self {
        self.package_error = Some(message.to_string());
        self
    }

    /// Make every service query fail with `message`.
    pub fn failing_services(mut self, message: &str) -> Self {
        self.service_error = Some(message.to_string());
        self
    }
}

impl PackageProbe for FakeHost {
    fn package(&self, name: &str) -> Result<PackageInfo> {
        if let Some(message) = &self.package_error {
            return Err(HostspecError::ProbeUnavailable {
                kind: "package".to_string(),
                message: message.clone(),
            });
        }
        Ok(self
            .packages
            .get(name)
            .cloned()
            .unwrap_or_else(|| PackageInfo::missing(name)))
    }
}

impl ServiceProbe for FakeHost {
    fn service(&self, name: &str) -> Result<ServiceInfo> {
        if let Some(message) = &self.service_error {
            return Err(HostspecError::ProbeUnavailable {
                kind: "service".to_string(),
                message: message.clone(),
            });
        }
        Ok(self
            .services
            .get(name)
            .cloned()
            .unwrap_or_else(|| ServiceInfo::new(name, false, false, false)))
    }
}
