//! Check configuration.
//!
//! The only required input is the expected Docker version, taken from
//! [`DOCKER_VERSION_VAR`]. It is validated once when a [`CheckConfig`] is
//! built and then passed explicitly to the checks.
//!
//! # Example
//!
//! ```
//! use hostspec::config::CheckConfig;
//!
//! let config = CheckConfig::new("17.03.2").with_service("dockerd");
//! assert_eq!(config.package, "docker-engine");
//! assert_eq!(config.service, "dockerd");
//! ```

pub mod env;

pub use env::{
    debug_enabled_with, optional_var_with, required_var, required_var_with, DEBUG_VAR,
    DOCKER_VERSION_VAR,
};

use std::env::VarError;

use crate::error::Result;

/// Package checked by default.
pub const DEFAULT_PACKAGE: &str = "docker-engine";

/// Service checked by default.
pub const DEFAULT_SERVICE: &str = "docker";

/// Validated inputs for a compliance run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckConfig {
    /// Substring the installed package version must contain.
    pub expected_version: String,
    /// Package to inspect.
    pub package: String,
    /// Service to inspect.
    pub service: String,
}

impl CheckConfig {
    /// Create a config with the default package and service names.
    pub fn new(expected_version: impl Into<String>) -> Self {
        Self {
            expected_version: expected_version.into(),
            package: DEFAULT_PACKAGE.to_string(),
            service: DEFAULT_SERVICE.to_string(),
        }
    }

    /// Build a config from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(|key: &str| std::env::var(key))
    }

    /// Build a config using a custom environment lookup.
    ///
    /// Fails with [`crate::HostspecError::MissingEnvVar`] when the version
    /// variable is unset or empty.
    pub fn from_env_with<F>(env_fn: F) -> Result<Self>
    where
        F: Fn(&str) -> std::result::Result<String, VarError>,
    {
        let version = required_var_with(DOCKER_VERSION_VAR, &env_fn)?;
        tracing::debug!("Expected docker version: {}", version);
        Ok(Self::new(version))
    }

    /// Override the package name.
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    /// Override the service name.
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = service.into();
        self
    }
}
