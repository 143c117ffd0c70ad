//! Service manager probe.
//!
//! systemd hosts are queried through `systemctl`. Hosts without systemd fall
//! back to SysV init conventions: an init script in `/etc/init.d`, start
//! links in the runlevel directories, and `service <name> status`.

use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::{HostspecError, Result};
use crate::shell::{CommandResult, CommandRunner};

use super::{ServiceInfo, ServiceProbe};

/// Runlevels whose start links count as "enabled".
const SYSV_RUNLEVELS: &[&str] = &["rc2.d", "rc3.d", "rc4.d", "rc5.d"];

/// Supported service managers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceBackend {
    /// systemd via `systemctl`.
    Systemd,
    /// SysV init scripts.
    SysV,
}

impl ServiceBackend {
    /// Detect the service manager running on the host rooted at `root`.
    ///
    /// `/run/systemd/system` only exists when systemd is PID 1, so an
    /// installed-but-unused `systemctl` does not count.
    pub fn detect(runner: &dyn CommandRunner, root: &Path) -> Option<Self> {
        if runner.is_dir(&root.join("run/systemd/system")) && runner.has_program("systemctl") {
            Some(Self::Systemd)
        } else if runner.is_dir(&root.join("etc/init.d")) {
            Some(Self::SysV)
        } else {
            None
        }
    }
}

/// Whether `systemctl show --property=LoadState` output names a loaded unit.
pub fn parse_load_state(output: &str) -> bool {
    output
        .lines()
        .filter_map(|line| line.trim().strip_prefix("LoadState="))
        .any(|state| !state.is_empty() && state != "not-found")
}

/// Whether `systemctl is-enabled` says the unit starts at boot.
///
/// systemctl exits 0 for `enabled`, `enabled-runtime`, `static`, `indirect`,
/// `generated` and `alias`, so the exit status decides. The disabled states
/// are rejected by name as well, for systemctl builds that exit 0 on them.
pub fn parse_is_enabled(result: &CommandResult) -> bool {
    result.success
        && !matches!(
            result.first_line(),
            "" | "disabled" | "masked" | "masked-runtime" | "linked" | "linked-runtime" | "bad"
        )
}

/// Whether `systemctl is-active` output means the unit is running.
pub fn parse_is_active(output: &str) -> bool {
    output.trim() == "active"
}

/// Service probe backed by the host service manager.
#[derive(Debug)]
pub struct HostServiceProbe<R> {
    runner: R,
    root: PathBuf,
    backend: Option<ServiceBackend>,
}

impl<R: CommandRunner> HostServiceProbe<R> {
    /// Build a probe for the running host.
    pub fn new(runner: R) -> Self {
        Self::with_root(runner, PathBuf::from("/"))
    }

    /// Build a probe that resolves host paths under `root`.
    pub fn with_root(runner: R, root: PathBuf) -> Self {
        let backend = ServiceBackend::detect(&runner, &root);
        tracing::debug!("Service backend: {:?}", backend);
        Self {
            runner,
            root,
            backend,
        }
    }

    /// The detected backend, if any.
    pub fn backend(&self) -> Option<ServiceBackend> {
        self.backend
    }

    fn systemd(&self, name: &str) -> Result<ServiceInfo> {
        let show = self
            .runner
            .run("systemctl", &["show", "--property=LoadState", name])?;
        if !show.success {
            return Err(HostspecError::CommandFailed {
                command: format!("systemctl show --property=LoadState {}", name),
                code: show.exit_code,
            });
        }
        let installed = parse_load_state(&show.stdout);

        // is-active exits non-zero for inactive units; only its stdout matters.
        let enabled = parse_is_enabled(&self.runner.run("systemctl", &["is-enabled", name])?);
        let running = parse_is_active(&self.runner.run("systemctl", &["is-active", name])?.stdout);

        Ok(ServiceInfo::new(name, installed, enabled, running))
    }

    fn sysv(&self, name: &str) -> Result<ServiceInfo> {
        let script = self.root.join("etc/init.d").join(name);
        let installed = self.runner.is_file(&script);
        let enabled = self.sysv_enabled(name)?;

        let running = if !installed {
            false
        } else if self.runner.has_program("service") {
            self.runner.run("service", &[name, "status"])?.success
        } else {
            let script = script.to_string_lossy();
            self.runner.run(&script, &["status"])?.success
        };

        Ok(ServiceInfo::new(name, installed, enabled, running))
    }

    fn sysv_enabled(&self, name: &str) -> Result<bool> {
        let pattern = Regex::new(&format!(r"^S\d{{2}}{}$", regex::escape(name)))
            .map_err(anyhow::Error::from)?;

        Ok(SYSV_RUNLEVELS.iter().any(|runlevel| {
            self.runner
                .list_dir(&self.root.join("etc").join(runlevel))
                .iter()
                .any(|entry| pattern.is_match(entry))
        }))
    }
}

impl<R: CommandRunner> ServiceProbe for HostServiceProbe<R> {
    fn service(&self, name: &str) -> Result<ServiceInfo> {
        let info = match self.backend {
            Some(ServiceBackend::Systemd) => self.systemd(name)?,
            Some(ServiceBackend::SysV) => self.sysv(name)?,
            None => {
                return Err(HostspecError::ProbeUnavailable {
                    kind: "service".to_string(),
                    message: "neither systemd nor SysV init was detected".to_string(),
                })
            }
        };

        tracing::debug!(
            "Service {}: installed={} enabled={} running={}",
            name,
            info.installed,
            info.enabled,
            info.running
        );
        Ok(info)
    }
}
