//! Check command implementation.
//!
//! The `hostspec check` command validates configuration, probes the host and
//! reports every assertion of the docker profile.

use std::env::VarError;
use std::path::PathBuf;

use crate::checks::{profile::PROFILE_NAME, DockerProfile, RunReport};
use crate::cli::args::CheckArgs;
use crate::config::CheckConfig;
use crate::error::Result;
use crate::probe::{HostPackageProbe, HostServiceProbe, PackageProbe, ServiceProbe};
use crate::report::{HumanFormatter, JsonFormatter, ReportFormatter};
use crate::shell::ssh::DEFAULT_RETRY_DELAY;
use crate::shell::{SshRunner, SystemRunner};
use crate::ui::{should_use_colors, OutputMode, UserInterface};

use super::dispatcher::{Command, CommandResult, EXIT_CONFIG_ERROR, EXIT_FAILED_CHECKS};

/// Directories searched for package and service tools in addition to PATH.
const SBIN_DIRS: &[&str] = &["/usr/local/sbin", "/usr/sbin", "/sbin"];

/// The check command implementation.
pub struct CheckCommand {
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(args: CheckArgs) -> Self {
        Self { args }
    }

    /// Build the check configuration from an environment lookup and the
    /// command-line targets.
    pub fn load_config<F>(&self, env_fn: F) -> Result<CheckConfig>
    where
        F: Fn(&str) -> std::result::Result<String, VarError>,
    {
        Ok(CheckConfig::from_env_with(env_fn)?
            .with_package(&self.args.target.package)
            .with_service(&self.args.target.service))
    }

    /// Validate configuration, then run the profile against the given probes.
    ///
    /// A missing or empty version variable is reported through `ui` and
    /// yields exit code 2 without querying either probe.
    pub fn execute_with<F>(
        &self,
        ui: &mut dyn UserInterface,
        env_fn: F,
        packages: &dyn PackageProbe,
        services: &dyn ServiceProbe,
    ) -> Result<CommandResult>
    where
        F: Fn(&str) -> std::result::Result<String, VarError>,
    {
        match self.config_or_abort(ui, env_fn)? {
            Some(config) => self.check(ui, config, packages, services),
            None => Ok(CommandResult::failure(EXIT_CONFIG_ERROR)),
        }
    }

    /// Load the configuration, reporting a missing variable through `ui`.
    ///
    /// `None` means the run must stop before any probe is queried.
    fn config_or_abort<F>(
        &self,
        ui: &mut dyn UserInterface,
        env_fn: F,
    ) -> Result<Option<CheckConfig>>
    where
        F: Fn(&str) -> std::result::Result<String, VarError>,
    {
        match self.load_config(env_fn) {
            Ok(config) => Ok(Some(config)),
            Err(e) if e.is_config_error() => {
                tracing::debug!("Aborting before any check: {}", e);
                ui.error(&e.to_string());
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn check(
        &self,
        ui: &mut dyn UserInterface,
        config: CheckConfig,
        packages: &dyn PackageProbe,
        services: &dyn ServiceProbe,
    ) -> Result<CommandResult> {
        let profile = DockerProfile::new(config);
        if ui.output_mode() == OutputMode::Verbose && !self.args.json {
            let config = profile.config();
            let host = self.args.remote.host.as_deref().unwrap_or("localhost");
            ui.message(&format!(
                "Expecting package {} with version including {:?}, service {} on {}",
                config.package, config.expected_version, config.service, host
            ));
        }

        let report = profile.run(packages, services);
        self.show_report(ui, &report)?;

        if report.success() {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(EXIT_FAILED_CHECKS))
        }
    }

    fn show_report(&self, ui: &mut dyn UserInterface, report: &RunReport) -> Result<()> {
        if self.args.json {
            let rendered = JsonFormatter::new().render(report)?;
            ui.data(rendered.trim_end());
            return Ok(());
        }

        let mode = ui.output_mode();
        let mut formatter = HumanFormatter::new(should_use_colors());
        if !mode.shows_passes() {
            formatter = formatter.failures_only();
        }

        if mode != OutputMode::Quiet {
            ui.show_header(PROFILE_NAME);
        }
        ui.message(formatter.render(report)?.trim_end());
        Ok(())
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(config) = self.config_or_abort(ui, |key: &str| std::env::var(key))? else {
            return Ok(CommandResult::failure(EXIT_CONFIG_ERROR));
        };

        let sbin: Vec<PathBuf> = SBIN_DIRS.iter().map(PathBuf::from).collect();

        match self.args.remote.target() {
            Some(target) => {
                let runner = SshRunner::new(SystemRunner::new(), target)
                    .with_extra_path(sbin)
                    .with_retries(self.args.remote.ssh_attempts, DEFAULT_RETRY_DELAY);
                tracing::debug!("Checking {} over ssh", runner.target().destination);
                runner.check_connection()?;

                let packages = HostPackageProbe::new(runner.clone());
                let services = HostServiceProbe::new(runner);
                self.check(ui, config, &packages, &services)
            }
            None => {
                let runner = SystemRunner::new().with_extra_path(sbin);
                let packages = HostPackageProbe::new(runner.clone());
                let services = HostServiceProbe::new(runner);
                self.check(ui, config, &packages, &services)
            }
        }
    }
}
