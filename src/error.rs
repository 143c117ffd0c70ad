//! Error types for hostspec operations.
//!
//! This module defines [`HostspecError`], the primary error type used
//! throughout the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Configuration problems are errors and abort the run before any probe
//! - Probe problems are errors at the probe boundary, then become failed
//!   assertions inside the report
//! - Assertion failures are never errors; they are data in the report

use thiserror::Error;

/// Core error type for hostspec operations.
#[derive(Debug, Error)]
pub enum HostspecError {
    /// A required environment variable is unset or empty.
    #[error("Failed to find required envvar '{name}'!")]
    MissingEnvVar { name: String },

    /// No supported package or service manager was found on the host.
    #[error("No {kind} manager available: {message}")]
    ProbeUnavailable { kind: String, message: String },

    /// A probe command could not be run or exited unexpectedly.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The remote host could not be reached over SSH.
    #[error("Could not reach {host} over ssh after {attempts} attempt(s)")]
    Unreachable { host: String, attempts: u32 },

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HostspecError {
    /// Whether this error is a configuration problem (as opposed to a
    /// runtime failure).
    pub fn is_config_error(&self) -> bool {
        matches!(self, HostspecError::MissingEnvVar { .. })
    }
}

/// Result type alias for hostspec operations.
pub type Result<T> = std::result::Result<T, HostspecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_env_var_displays_name() {
        let err = HostspecError::MissingEnvVar {
            name: "RANCHER_DOCKER_VERSION".into(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to find required envvar 'RANCHER_DOCKER_VERSION'!"
        );
    }

    #[test]
    fn missing_env_var_is_config_error() {
        let err = HostspecError::MissingEnvVar { name: "X".into() };
        assert!(err.is_config_error());
    }

    #[test]
    fn probe_unavailable_displays_kind_and_message() {
        let err = HostspecError::ProbeUnavailable {
            kind: "package".into(),
            message: "neither dpkg-query nor rpm found".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("package"));
        assert!(msg.contains("dpkg-query"));
        assert!(!err.is_config_error());
    }

    #[test]
    fn command_failed_displays_command_and_code() {
        let err = HostspecError::CommandFailed {
            command: "systemctl is-active docker".into(),
            code: Some(3),
        };
        let msg = err.to_string();
        assert!(msg.contains("systemctl is-active docker"));
        assert!(msg.contains("3"));
    }

    #[test]
    fn unreachable_displays_host_and_attempts() {
        let err = HostspecError::Unreachable {
            host: "admin@10.0.0.5".into(),
            attempts: 3,
        };
        assert_eq!(
            err.to_string(),
            "Could not reach admin@10.0.0.5 over ssh after 3 attempt(s)"
        );
        assert!(!err.is_config_error());
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: HostspecError = io_err.into();
        assert!(matches!(err, HostspecError::Io(_)));
    }

    #[test]
    fn anyhow_error_is_transparent() {
        let err: HostspecError = anyhow::anyhow!("something odd").into();
        assert_eq!(err.to_string(), "something odd");
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(HostspecError::MissingEnvVar { name: "X".into() })
        }
        assert!(returns_error().is_err());
    }
}
