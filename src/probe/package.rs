//! Package database probe.
//!
//! Supports Debian-style (`dpkg-query`) and RPM-style (`rpm`) hosts. The
//! backend is picked once, when the probe is built.

use crate::error::{HostspecError, Result};
use crate::shell::{CommandResult, CommandRunner};

use super::{PackageInfo, PackageProbe};

/// Output format handed to `dpkg-query -f`. dpkg expands the escapes.
const DPKG_FORMAT: &str = "${Status}\\t${Version}\\n";

/// Output format handed to `rpm --queryformat`. rpm expands the escape.
const RPM_FORMAT: &str = "%{VERSION}-%{RELEASE}\\n";

/// Supported package databases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageBackend {
    /// Debian, Ubuntu and derivatives.
    Dpkg,
    /// RHEL, CentOS, Fedora, SUSE.
    Rpm,
}

impl PackageBackend {
    /// Detect the package database from the available tools.
    ///
    /// `dpkg-query` wins when both are present; some Debian hosts ship `rpm`
    /// as a plain utility with an empty database.
    pub fn detect(runner: &dyn CommandRunner) -> Option<Self> {
        if runner.has_program("dpkg-query") {
            Some(Self::Dpkg)
        } else if runner.has_program("rpm") {
            Some(Self::Rpm)
        } else {
            None
        }
    }

    /// Program used to query this backend.
    pub fn program(&self) -> &'static str {
        match self {
            Self::Dpkg => "dpkg-query",
            Self::Rpm => "rpm",
        }
    }

    fn query_args<'a>(&self, name: &'a str) -> Vec<&'a str> {
        match self {
            Self::Dpkg => vec!["-W", "-f", DPKG_FORMAT, name],
            Self::Rpm => vec!["-q", "--queryformat", RPM_FORMAT, name],
        }
    }

    fn parse(&self, name: &str, result: &CommandResult) -> PackageInfo {
        match self {
            Self::Dpkg => parse_dpkg_output(name, result),
            Self::Rpm => parse_rpm_output(name, result),
        }
    }
}

/// Interpret `dpkg-query -W -f '${Status}\t${Version}\n'` output.
///
/// A package counts as installed only when the status' current state is
/// `installed` (`install ok installed`). Removed packages that left config
/// files behind (`deinstall ok config-files`) are not installed. A non-zero
/// exit means dpkg has never heard of the package.
pub fn parse_dpkg_output(name: &str, result: &CommandResult) -> PackageInfo {
    if !result.success {
        return PackageInfo::missing(name);
    }

    let line = result.first_line();
    let (status, version) = line.split_once('\t').unwrap_or((line, ""));
    let installed = status.split_whitespace().nth(2) == Some("installed");
    let version = version.trim();

    if installed && !version.is_empty() {
        PackageInfo::installed(name, version)
    } else {
        PackageInfo::missing(name)
    }
}

/// Interpret `rpm -q --queryformat '%{VERSION}-%{RELEASE}\n'` output.
///
/// rpm exits non-zero and prints `package <name> is not installed` for
/// unknown packages. With several versions installed the first is reported.
pub fn parse_rpm_output(name: &str, result: &CommandResult) -> PackageInfo {
    let version = result.first_line();
    if !result.success || version.is_empty() {
        return PackageInfo::missing(name);
    }
    PackageInfo::installed(name, version)
}

/// Package probe backed by the host package database.
#[derive(Debug)]
pub struct HostPackageProbe<R> {
    runner: R,
    backend: Option<PackageBackend>,
}

impl<R: CommandRunner> HostPackageProbe<R> {
    /// Build a probe, detecting the backend from `runner`.
    pub fn new(runner: R) -> Self {
        let backend = PackageBackend::detect(&runner);
        tracing::debug!("Package backend: {:?}", backend);
        Self { runner, backend }
    }

    /// Build a probe for a specific backend.
    pub fn with_backend(runner: R, backend: PackageBackend) -> Self {
        Self {
            runner,
            backend: Some(backend),
        }
    }

    /// The detected backend, if any.
    pub fn backend(&self) -> Option<PackageBackend> {
        self.backend
    }
}

impl<R: CommandRunner> PackageProbe for HostPackageProbe<R> {
    fn package(&self, name: &str) -> Result<PackageInfo> {
        let backend = self.backend.ok_or_else(|| HostspecError::ProbeUnavailable {
            kind: "package".to_string(),
            message: "neither dpkg-query nor rpm was found on PATH".to_string(),
        })?;

        let result = self
            .runner
            .run(backend.program(), &backend.query_args(name))?;
        let info = backend.parse(name, &result);

        tracing::debug!(
            "Package {}: installed={} version={:?}",
            name,
            info.installed,
            info.version
        );
        Ok(info)
    }
}
