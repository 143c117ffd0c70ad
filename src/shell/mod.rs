//! Host program execution.

pub mod command;
pub mod mock;
pub mod path;
pub mod ssh;

pub use command::{format_command, CommandResult, CommandRunner, SystemRunner};
pub use mock::ScriptedRunner;
pub use path::{is_executable, parse_system_path, resolve_tool_path};
pub use ssh::{shell_quote, SshRunner, SshTarget};
