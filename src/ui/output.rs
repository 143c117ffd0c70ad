//! Output verbosity.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show every assertion plus the targets being checked.
    Verbose,
    /// Show every assertion.
    #[default]
    Normal,
    /// Show failures and the summary only.
    Quiet,
}

impl OutputMode {
    /// Pick the mode from the global `--verbose`/`--quiet` flags.
    /// `--quiet` wins when both are given.
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    /// Check if this mode shows passing assertions.
    pub fn shows_passes(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal)
    }

    /// Check if this mode shows warnings and headers.
    pub fn shows_status(&self) -> bool {
        !matches!(self, Self::Quiet)
    }
}
