//! Remote execution over ssh.
//!
//! [`SshRunner`] wraps a local [`CommandRunner`] and sends every
//! command through the `ssh` client, so the same host checks can inspect another
//! machine. Filesystem checks become `test` and `ls` on the remote side.
//!
//! # Example
//!
//! ```
//! use hostspec::shell::{CommandResult, CommandRunner, ScriptedRunner, SshRunner, SshTarget};
//!
//! let target = SshTarget::new("admin@10.0.0.5");
//! let local = ScriptedRunner::new().respond(
//!     "ssh -o BatchMode=yes -o StrictHostKeyChecking=accept-new -o ConnectTimeout=10 \
//!      admin@10.0.0.5 LC_ALL=C systemctl is-active docker",
//!     CommandResult::success("active\n"),
//! );
//!
//! let runner = SshRunner::new(local, target);
//! let result = runner.run("systemctl", &["is-active", "docker"]).unwrap();
//! assert_eq!(result.first_line(), "active");
//! ```

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use crate::error::{HostspecError, Result};

use super::command::{CommandResult, CommandRunner};

/// Exit status ssh reserves for its own failures (unreachable host, refused
/// connection, rejected key).
const SSH_ERROR_EXIT: i32 = 255;

/// Seconds ssh waits for the connection to be established.
pub const DEFAULT_CONNECT_TIMEOUT: u64 = 10;

/// Connection attempts before a host counts as unreachable.
pub const DEFAULT_ATTEMPTS: u32 = 3;

/// Pause between connection attempts.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Where and how to connect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshTarget {
    /// `[user@]host`, handed to ssh as is.
    pub destination: String,
    /// Private key passed with `-i`.
    pub identity: Option<PathBuf>,
    /// Port passed with `-p`.
    pub port: Option<u16>,
    /// `ConnectTimeout` in seconds.
    pub connect_timeout: u64,
}

impl SshTarget {
    /// Target `destination` with the default timeout and ssh's own key and
    /// port selection.
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            identity: None,
            port: None,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    /// Use this private key.
    pub fn with_identity(mut self, identity: impl Into<PathBuf>) -> Self {
        self.identity = Some(identity.into());
        self
    }

    /// Connect to this port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Give up connecting after `seconds`.
    pub fn with_connect_timeout(mut self, seconds: u64) -> Self {
        self.connect_timeout = seconds;
        self
    }

    /// ssh arguments up to and including the destination.
    ///
    /// Batch mode keeps ssh from prompting. Unknown host keys are accepted
    /// on first contact; changed keys still abort the connection.
    pub fn ssh_args(&self) -> Vec<String> {
        let mut args = vec![
            "-o".to_string(),
            "BatchMode=yes".to_string(),
            "-o".to_string(),
            "StrictHostKeyChecking=accept-new".to_string(),
            "-o".to_string(),
            format!("ConnectTimeout={}", self.connect_timeout),
        ];
        if let Some(identity) = &self.identity {
            args.push("-i".to_string());
            args.push(identity.to_string_lossy().into_owned());
        }
        if let Some(port) = self.port {
            args.push("-p".to_string());
            args.push(port.to_string());
        }
        args.push(self.destination.clone());
        args
    }
}

/// Quote `word` for a POSIX shell. Words made only of safe characters are
/// left alone.
pub fn shell_quote(word: &str) -> String {
    let safe = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:,@%+".contains(c));
    if safe {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}

/// Runs programs on a remote host through the local `ssh` client.
///
/// ssh exiting with 255 is retried up to the attempt limit and then reported
/// as [`HostspecError::Unreachable`]. Any other status belongs to the remote
/// program and is returned as is.
#[derive(Debug, Clone)]
pub struct SshRunner<R> {
    local: R,
    target: SshTarget,
    extra_path: Vec<PathBuf>,
    max_attempts: u32,
    retry_delay: Duration,
}

impl<R: CommandRunner> SshRunner<R> {
    /// Reach `target` by running `ssh` through `local`.
    pub fn new(local: R, target: SshTarget) -> Self {
        Self {
            local,
            target,
            extra_path: Vec::new(),
            max_attempts: DEFAULT_ATTEMPTS,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }

    /// Append these directories to the remote PATH.
    pub fn with_extra_path(mut self, dirs: Vec<PathBuf>) -> Self {
        self.extra_path = dirs;
        self
    }

    /// Try to connect `max_attempts` times (at least once), pausing
    /// `retry_delay` in between.
    pub fn with_retries(mut self, max_attempts: u32, retry_delay: Duration) -> Self {
        self.max_attempts = max_attempts.max(1);
        self.retry_delay = retry_delay;
        self
    }

    /// The host this runner reaches.
    pub fn target(&self) -> &SshTarget {
        &self.target
    }

    /// Fail early when the host cannot be reached at all.
    pub fn check_connection(&self) -> Result<()> {
        self.exec("true")?;
        Ok(())
    }

    /// The shell line executed remotely for `program args...`.
    pub fn remote_command(&self, program: &str, args: &[&str]) -> String {
        let words: Vec<String> = std::iter::once(program)
            .chain(args.iter().copied())
            .map(shell_quote)
            .collect();
        format!("{}LC_ALL=C {}", self.path_prefix(), words.join(" "))
    }

    fn path_prefix(&self) -> String {
        if self.extra_path.is_empty() {
            return String::new();
        }
        let dirs: Vec<String> = self
            .extra_path
            .iter()
            .map(|dir| shell_quote(&dir.to_string_lossy()))
            .collect();
        format!("PATH=\"$PATH\":{}; export PATH; ", dirs.join(":"))
    }

    fn exec(&self, remote_line: &str) -> Result<CommandResult> {
        let mut args = self.target.ssh_args();
        args.push(remote_line.to_string());
        let args: Vec<&str> = args.iter().map(String::as_str).collect();

        for attempt in 1..=self.max_attempts {
            let result = self.local.run("ssh", &args)?;
            if result.exit_code != Some(SSH_ERROR_EXIT) {
                return Ok(result);
            }

            tracing::warn!(
                "ssh to {} failed (attempt {}/{}): {}",
                self.target.destination,
                attempt,
                self.max_attempts,
                result.stderr.trim()
            );
            if attempt < self.max_attempts {
                thread::sleep(self.retry_delay);
            }
        }

        Err(HostspecError::Unreachable {
            host: self.target.destination.clone(),
            attempts: self.max_attempts,
        })
    }

    fn remote_test(&self, flag: &str, path: &Path) -> bool {
        let path = path.to_string_lossy();
        self.run("test", &[flag, path.as_ref()])
            .map(|result| result.success)
            .unwrap_or(false)
    }
}

impl<R: CommandRunner> CommandRunner for SshRunner<R> {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandResult> {
        self.exec(&self.remote_command(program, args))
    }

    fn has_program(&self, program: &str) -> bool {
        let line = format!(
            "{}command -v {} >/dev/null",
            self.path_prefix(),
            shell_quote(program)
        );
        self.exec(&line)
            .map(|result| result.success)
            .unwrap_or(false)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.remote_test("-d", path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.remote_test("-f", path)
    }

    fn list_dir(&self, path: &Path) -> Vec<String> {
        let path = path.to_string_lossy();
        match self.run("ls", &["-1A", path.as_ref()]) {
            Ok(result) if result.success => {
                result.stdout.lines().map(str::to_string).collect()
            }
            _ => Vec::new(),
        }
    }
}
