//! Command-line interface for hostspec.
//!
//! This module provides the CLI argument parsing using clap's derive macros
//! and command implementations.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{CheckArgs, Cli, Commands, CompletionsArgs, ListArgs, RemoteArgs, TargetArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
