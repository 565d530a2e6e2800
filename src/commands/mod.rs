//! Command implementations behind the CLI flags.

mod init_project;
mod options;

pub use init_project::{init_project, InitResult};
pub use options::{resolve_settings, ResolvedSettings, RunOptions};
