//! Configuration for the two install scopes.
//!
//! - Global: a workspace located through `config.json` / environment
//! - Project: the current working directory

pub mod paths;
pub mod settings;

pub use paths::{ScopePaths, paths_for_scope};
pub use settings::{ConfigFile, Settings, read_config_file};
