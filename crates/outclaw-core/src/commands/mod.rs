//! High-level commands for outclaw operations.
//!
//! Each command wraps one pipeline so the CLI only parses arguments and
//! prints reports.

pub mod install;
pub mod search;
pub mod uninstall;

pub use install::{InstallCommand, InstallOptions, InstallReport};
pub use search::SearchCommand;
pub use uninstall::{UninstallCommand, UninstallReport};
