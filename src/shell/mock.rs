//! Scripted command runner for testing.
//!
//! `ScriptedRunner` implements [`CommandRunner`] with canned responses keyed
//! by the full command line, and records every command it was asked to run.
//!
//! # Example
//!
//! ```
//! use hostspec::shell::{CommandResult, CommandRunner, ScriptedRunner};
//!
//! let runner = ScriptedRunner::new()
//!     .with_program("systemctl")
//!     .respond("systemctl is-active docker", CommandResult::success("active\n"));
//!
//! let result = runner.run("systemctl", &["is-active", "docker"]).unwrap();
//! assert_eq!(result.first_line(), "active");
//! assert_eq!(runner.calls(), vec!["systemctl is-active docker".to_string()]);
//! ```

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use crate::error::{HostspecError, Result};

use super::command::{format_command, CommandResult, CommandRunner};

/// Command runner that replays pre-configured results.
///
/// Commands without a configured response fail to start, the same way a
/// missing binary does on a real host.
#[derive(Debug, Default, Clone)]
pub struct ScriptedRunner {
    programs: HashSet<String>,
    responses: HashMap<String, CommandResult>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedRunner {
    /// Create an empty runner: no programs, no responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a program as present on the search path.
    pub fn with_program(mut self, program: &str) -> Self {
        self.programs.insert(program.to_string());
        self
    }

    /// Configure the result for a full command line (`"prog arg1 arg2"`).
    pub fn respond(mut self, command: &str, result: CommandResult) -> Self {
        self.responses.insert(command.to_string(), result);
        self
    }

    /// Every command line run so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandResult> {
        let command = format_command(program, args);
        self.calls.borrow_mut().push(command.clone());
        self.responses
            .get(&command)
            .cloned()
            .ok_or(HostspecError::CommandFailed {
                command,
                code: None,
            })
    }

    fn has_program(&self, program: &str) -> bool {
        self.programs.contains(program)
    }
}
