//! Install command implementation.
//!
//! Resolves a specifier, fetches the content and hands it to the scope's
//! skill manager, which validates it before anything is written.

use std::path::PathBuf;

use crate::context::AppContext;
use crate::error::Result;
use crate::fetch::Fetcher;
use crate::lockfile::ManifestSource;
use crate::skills::{self, SkillManager};
use crate::source;
use crate::types::Scope;

/// Options for the install command
#[derive(Debug, Clone)]
pub struct InstallOptions {
    /// Free-form source specifier
    pub specifier: String,
    /// Replace an already installed skill
    pub force: bool,
}

impl InstallOptions {
    pub fn new(specifier: impl Into<String>) -> Self {
        Self {
            specifier: specifier.into(),
            force: false,
        }
    }

    /// Set the force flag
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}

/// Report from an install operation
#[derive(Debug, Clone)]
pub struct InstallReport {
    /// Name of the installed skill
    pub name: String,
    /// Skill directory
    pub path: PathBuf,
    /// Provenance written to the lock file
    pub source: ManifestSource,
    /// Canonical registry id, for registry sources
    pub registry_id: Option<String>,
    /// Any warnings generated during installation
    pub warnings: Vec<String>,
}

/// Install command orchestrator
#[derive(Debug, Clone)]
pub struct InstallCommand {
    fetcher: Fetcher,
    manager: SkillManager,
}

impl InstallCommand {
    pub fn new(fetcher: Fetcher, manager: SkillManager) -> Self {
        Self { fetcher, manager }
    }

    pub fn from_context(ctx: &AppContext, scope: Scope) -> Result<Self> {
        Ok(Self::new(ctx.fetcher()?, ctx.skill_manager(scope)))
    }

    pub async fn execute(&self, options: &InstallOptions) -> Result<InstallReport> {
        let (rule, spec) = source::classify(&options.specifier);
        tracing::debug!(rule, kind = spec.kind(), "installing");

        let fetched = self.fetcher.fetch(&spec).await?;
        let source = ManifestSource::from_specifier(&spec, fetched.registry_id.as_deref());

        let install = skills::InstallOptions::new(source.clone()).with_force(options.force);
        let path = self
            .manager
            .install(&fetched.name, &fetched.content, install)?;

        Ok(InstallReport {
            name: fetched.name,
            path,
            source,
            registry_id: fetched.registry_id,
            warnings: fetched.warnings,
        })
    }
}
