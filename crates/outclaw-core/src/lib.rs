//! Outclaw Core Library
//!
//! Resolves skill specifiers, fetches skill documents and keeps the
//! per-scope skill directories and lock files consistent.

pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod fetch;
pub mod http;
pub mod lockfile;
pub mod registry;
pub mod skills;
pub mod source;
pub mod types;

pub use error::{Error, Result};

/// Re-exports of commonly used types
pub mod prelude {
    pub use crate::context::AppContext;
    pub use crate::error::{Error, Result};
    pub use crate::types::Scope;

    // Commands
    pub use crate::commands::{
        InstallCommand, InstallOptions, InstallReport, SearchCommand, UninstallCommand,
        UninstallReport,
    };

    // Skills
    pub use crate::skills::{CreateOptions, Frontmatter, SkillDocument, SkillInfo, SkillManager};

    // Sources
    pub use crate::fetch::{FetchedSkill, Fetcher};
    pub use crate::source::{HostedRef, Specifier};

    // Registry
    pub use crate::registry::{RegistryClient, SearchOptions, SearchPage, SearchSort, SkillSummary};

    // Lock file
    pub use crate::lockfile::{Manifest, ManifestEntry, ManifestSource, SourceType};
}
