//! External program execution.
//!
//! Probes never go through a shell: each query is a program plus an argument
//! list, run via a [`CommandRunner`] so tests can script the host.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use crate::error::{HostspecError, Result};

use super::path::{parse_system_path, resolve_tool_path};

/// Result of executing a program.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether the program succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            exit_code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
            duration: Duration::ZERO,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: Option<i32>, stdout: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: String::new(),
            duration: Duration::ZERO,
            success: false,
        }
    }

    /// First line of stdout, trimmed.
    pub fn first_line(&self) -> &str {
        self.stdout.lines().next().unwrap_or("").trim()
    }
}

/// Runs host programs on behalf of the probes.
pub trait CommandRunner {
    /// Run `program` with `args`, capturing stdout and stderr.
    ///
    /// A non-zero exit is a normal [`CommandResult`], not an error. Errors
    /// mean the program could not be started at all.
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandResult>;

    /// Whether `program` can be found on the search path.
    fn has_program(&self, program: &str) -> bool;

    /// Whether `path` is a directory on the host this runner targets.
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    /// Whether `path` is a regular file on the host this runner targets.
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    /// Entry names in the directory `path`. Empty when it is missing or
    /// unreadable.
    fn list_dir(&self, path: &Path) -> Vec<String> {
        fs::read_dir(path)
            .map(|entries| {
                entries
                    .filter_map(|entry| entry.ok())
                    .map(|entry| entry.file_name().to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Runs programs on the real host.
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    extra_path: Vec<PathBuf>,
}

impl SystemRunner {
    /// Create a runner that searches the process PATH.
    pub fn new() -> Self {
        Self::default()
    }

    /// Also search these directories after PATH.
    ///
    /// Package and service tools often live in `sbin` directories that are
    /// missing from unprivileged PATHs.
    pub fn with_extra_path(mut self, dirs: Vec<PathBuf>) -> Self {
        self.extra_path = dirs;
        self
    }

    fn search_path(&self) -> Vec<PathBuf> {
        let mut path = parse_system_path();
        for dir in &self.extra_path {
            if !path.contains(dir) {
                path.push(dir.clone());
            }
        }
        path
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandResult> {
        let start = Instant::now();
        let command_line = format_command(program, args);

        let resolved = resolve_tool_path(program, &self.search_path())
            .unwrap_or_else(|| PathBuf::from(program));

        tracing::debug!("Running: {}", command_line);

        let output = Command::new(&resolved)
            .args(args)
            .env("LC_ALL", "C")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                tracing::debug!("Failed to start {}: {}", command_line, e);
                HostspecError::CommandFailed {
                    command: command_line.clone(),
                    code: None,
                }
            })?;

        let result = CommandResult {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            duration: start.elapsed(),
            success: output.status.success(),
        };

        tracing::debug!(
            "{} exited with {:?} in {:?}",
            command_line,
            result.exit_code,
            result.duration
        );

        Ok(result)
    }

    fn has_program(&self, program: &str) -> bool {
        resolve_tool_path(program, &self.search_path()).is_some()
    }
}

/// Render a program and its arguments for logs and error messages.
pub fn format_command(program: &str, args: &[&str]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_command_joins_args() {
        assert_eq!(
            format_command("systemctl", &["is-active", "docker"]),
            "systemctl is-active docker"
        );
        assert_eq!(format_command("true", &[]), "true");
    }

    #[test]
    fn first_line_trims_output() {
        let result = CommandResult::success("  active  \nsecond\n");
        assert_eq!(result.first_line(), "active");
        assert_eq!(CommandResult::success("").first_line(), "");
    }

    #[test]
    fn failure_result_is_not_success() {
        let result = CommandResult::failure(Some(3), "inactive\n");
        assert!(!result.success);
        assert_eq!(result.exit_code, Some(3));
    }

    #[cfg(unix)]
    #[test]
    fn system_runner_captures_stdout() {
        let runner = SystemRunner::new();
        let result = runner.run("echo", &["hello"]).unwrap();
        assert!(result.success);
        assert_eq!(result.first_line(), "hello");
    }

    #[cfg(unix)]
    #[test]
    fn system_runner_reports_exit_code() {
        let runner = SystemRunner::new();
        let result = runner.run("sh", &["-c", "exit 3"]).unwrap();
        assert!(!result.success);
        assert_eq!(result.exit_code, Some(3));
    }

    #[test]
    fn system_runner_errors_for_missing_program() {
        let runner = SystemRunner::new();
        let err = runner
            .run("hostspec-definitely-missing-program", &[])
            .unwrap_err();
        assert!(matches!(err, HostspecError::CommandFailed { code: None, .. }));
    }

    #[test]
    fn local_filesystem_checks() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::write(temp.path().join("docker"), "").unwrap();
        let runner = SystemRunner::new();

        assert!(runner.is_dir(temp.path()));
        assert!(runner.is_file(&temp.path().join("docker")));
        assert!(!runner.is_file(&temp.path().join("missing")));
        assert_eq!(runner.list_dir(temp.path()), vec!["docker".to_string()]);
        assert!(runner.list_dir(&temp.path().join("missing")).is_empty());
    }

    #[test]
    fn system_runner_has_program_false_for_missing() {
        let runner = SystemRunner::new();
        assert!(!runner.has_program("hostspec-definitely-missing-program"));
    }

    #[cfg(unix)]
    #[test]
    fn system_runner_finds_program_on_extra_path() {
        use std::fs;
        use std::os::unix::fs::PermissionsExt;

        let temp = tempfile::TempDir::new().unwrap();
        let tool = temp.path().join("hostspec-extra-tool");
        fs::write(&tool, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&tool, fs::Permissions::from_mode(0o755)).unwrap();

        let runner = SystemRunner::new().with_extra_path(vec![temp.path().to_path_buf()]);
        assert!(runner.has_program("hostspec-extra-tool"));
    }
}
