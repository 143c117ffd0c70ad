//! hostspec - Declarative compliance checks for Docker hosts.
//!
//! hostspec verifies that the `docker-engine` package is installed at the
//! version named by `RANCHER_DOCKER_VERSION`, and that the `docker` service
//! is installed, enabled and running.
//!
//! # Modules
//!
//! - [`checks`] - Controls, expectations and the docker profile
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Environment-driven configuration
//! - [`error`] - Error types and result aliases
//! - [`probe`] - Package and service inspection backends
//! - [`report`] - Human and JSON report formatters
//! - [`shell`] - External command execution
//! - [`ui`] - Terminal output
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
//! let profile = DockerProfile::new(CheckConfig::new("17.03.2"));
//! let report = profile.run(&host, &host);
//! assert!(report.success());
//! assert_eq!(report.total(), 5);
//! ```

pub mod checks;
pub mod cli;
pub mod config;
pub mod error;
pub mod probe;
pub mod report;
pub mod shell;
pub mod ui;

pub use error::{HostspecError, Result};
