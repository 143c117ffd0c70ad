//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use std::path::PathBuf;

use crate::config::{DEFAULT_PACKAGE, DEFAULT_SERVICE};
use crate::shell::ssh::{DEFAULT_ATTEMPTS, DEFAULT_CONNECT_TIMEOUT};
use crate::shell::SshTarget;

/// hostspec - Declarative compliance checks for Docker hosts.
#[derive(Debug, Parser)]
#[command(name = "hostspec")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only show failures and the summary
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check this host against the docker profile (default if no command specified)
    Check(CheckArgs),

    /// List the profile's controls without probing the host
    List(ListArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Which package and service the profile inspects.
#[derive(Debug, Clone, clap::Args)]
pub struct TargetArgs {
    /// Package whose version is checked
    #[arg(long, env = "HOSTSPEC_PACKAGE", default_value = DEFAULT_PACKAGE)]
    pub package: String,

    /// Service that must be installed, enabled and running
    #[arg(long, env = "HOSTSPEC_SERVICE", default_value = DEFAULT_SERVICE)]
    pub service: String,
}

impl Default for TargetArgs {
    fn default() -> Self {
        Self {
            package: DEFAULT_PACKAGE.to_string(),
            service: DEFAULT_SERVICE.to_string(),
        }
    }
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub target: TargetArgs,

    #[command(flatten)]
    pub remote: RemoteArgs,
}

/// Where the checks run: this machine, or another one over ssh.
#[derive(Debug, Clone, clap::Args)]
pub struct RemoteArgs {
    /// Check a remote host over ssh instead of this one ([USER@]HOST)
    #[arg(long, env = "HOSTSPEC_HOST")]
    pub host: Option<String>,

    /// Private key for the ssh connection
    #[arg(long, env = "HOSTSPEC_SSH_KEY")]
    pub ssh_key: Option<PathBuf>,

    /// Port for the ssh connection
    #[arg(long)]
    pub ssh_port: Option<u16>,

    /// Seconds to wait for the ssh connection
    #[arg(long, default_value_t = DEFAULT_CONNECT_TIMEOUT)]
    pub ssh_timeout: u64,

    /// Connection attempts before the host counts as unreachable
    #[arg(long, default_value_t = DEFAULT_ATTEMPTS, value_parser = clap::value_parser!(u32).range(1..))]
    pub ssh_attempts: u32,
}

impl Default for RemoteArgs {
    fn default() -> Self {
        Self {
            host: None,
            ssh_key: None,
            ssh_port: None,
            ssh_timeout: DEFAULT_CONNECT_TIMEOUT,
            ssh_attempts: DEFAULT_ATTEMPTS,
        }
    }
}

impl RemoteArgs {
    /// The ssh target, when `--host` was given.
    pub fn target(&self) -> Option<SshTarget> {
        let host = self.host.as_deref().filter(|host| !host.is_empty())?;
        let mut target = SshTarget::new(host).with_connect_timeout(self.ssh_timeout);
        if let Some(key) = &self.ssh_key {
            target = target.with_identity(key);
        }
        if let Some(port) = self.ssh_port {
            target = target.with_port(port);
        }
        Some(target)
    }
}

impl CheckArgs {
    /// Arguments for a bare `hostspec` run: `check` with no flags, so the
    /// `HOSTSPEC_*` variables still apply.
    ///
    /// Fails when one of those variables holds a value clap rejects, such as
    /// a non-UTF-8 package name.
    pub fn from_env() -> crate::error::Result<Self> {
        let cmd = <Self as clap::Args>::augment_args(clap::Command::new("check"));
        let args = cmd
            .try_get_matches_from(["check"])
            .and_then(|matches| <Self as clap::FromArgMatches>::from_arg_matches(&matches))
            .map_err(anyhow::Error::from)?;
        Ok(args)
    }
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub target: TargetArgs,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
