//! Read-only host probes.
//!
//! The checks never talk to the host directly. They ask a [`PackageProbe`]
//! or a [`ServiceProbe`] for a snapshot and compare it against expectations.
//!
//! # Modules
//!
//! - [`package`] - Package database queries (dpkg, rpm)
//! - [`service`] - Service manager queries (systemd, SysV init)
//! - [`mock`] - In-memory host for tests
//!
//! # Example
//!
//! ```
//! use hostspec::probe::{FakeHost, PackageInfo, PackageProbe};
//!
//! let host = FakeHost::new().with_package(PackageInfo::installed("docker-engine", "17.03.2-ce"));
//! let info = host.package("docker-engine").unwrap();
//! assert!(info.installed);
//! assert_eq!(info.version.as_deref(), Some("17.03.2-ce"));
//! ```

pub mod mock;
pub mod package;
pub mod service;

pub use mock::FakeHost;
pub use package::{HostPackageProbe, PackageBackend};
pub use service::{HostServiceProbe, ServiceBackend};

use serde::Serialize;

use crate::error::Result;

/// Installation state of a package as reported by the package database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageInfo {
    /// Package name that was queried.
    pub name: String,
    /// Whether the package is installed.
    pub installed: bool,
    /// Reported version, if installed.
    pub version: Option<String>,
}

impl PackageInfo {
    /// An installed package at `version`.
    pub fn installed(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            installed: true,
            version: Some(version.into()),
        }
    }

    /// A package that is not installed.
    pub fn missing(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            installed: false,
            version: None,
        }
    }
}

/// State of a service as reported by the service manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceInfo {
    /// Service name that was queried.
    pub name: String,
    /// Whether the service is known to the service manager.
    pub installed: bool,
    /// Whether the service starts at boot.
    pub enabled: bool,
    /// Whether the service is currently running.
    pub running: bool,
}

impl ServiceInfo {
    /// Build a service snapshot from its three flags.
    pub fn new(name: impl Into<String>, installed: bool, enabled: bool, running: bool) -> Self {
        Self {
            name: name.into(),
            installed,
            enabled,
            running,
        }
    }
}

/// Queries the host package database.
pub trait PackageProbe {
    /// Look up a package by name.
    ///
    /// A package that is simply not installed is `Ok` with
    /// `installed: false`; errors mean the database could not be queried.
    fn package(&self, name: &str) -> Result<PackageInfo>;
}

/// Queries the host service manager.
pub trait ServiceProbe {
    /// Look up a service by name.
    fn service(&self, name: &str) -> Result<ServiceInfo>;
}
