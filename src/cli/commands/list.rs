//! List command implementation.
//!
//! The `hostspec list` command shows the profile's controls without probing
//! the host. A missing version variable is shown, not fatal.

use std::env::VarError;

use crate::checks::{profile::PROFILE_NAME, DockerProfile};
use crate::cli::args::ListArgs;
use crate::config::{optional_var_with, CheckConfig, DOCKER_VERSION_VAR};
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The list command implementation.
pub struct ListCommand {
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(args: ListArgs) -> Self {
        Self { args }
    }

    /// List controls using a custom environment lookup.
    pub fn execute_with<F>(&self, ui: &mut dyn UserInterface, env_fn: F) -> Result<CommandResult>
    where
        F: Fn(&str) -> std::result::Result<String, VarError>,
    {
        let version = optional_var_with(DOCKER_VERSION_VAR, &env_fn);
        if version.is_none() {
            ui.warning(&format!(
                "{} is not set; `hostspec check` will refuse to run",
                DOCKER_VERSION_VAR
            ));
        }

        let config = CheckConfig::new(
            version.unwrap_or_else(|| format!("${}", DOCKER_VERSION_VAR)),
        )
        .with_package(&self.args.target.package)
        .with_service(&self.args.target.service);

        ui.show_header(PROFILE_NAME);
        for control in DockerProfile::new(config).controls() {
            ui.message(&control.subject.to_string());
            for expectation in &control.expectations {
                ui.message(&format!("  {}", expectation.description()));
            }
        }

        Ok(CommandResult::success())
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        self.execute_with(ui, |key: &str| std::env::var(key))
    }
}
