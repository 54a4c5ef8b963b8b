//! Application context for unified dependency injection.

use std::path::{Path, PathBuf};

use crate::config::{ScopePaths, Settings, paths_for_scope};
use crate::error::Result;
use crate::fetch::{Fetcher, HostedFetcher, RegistryFetcher};
use crate::registry::RegistryClient;
use crate::skills::SkillManager;
use crate::types::Scope;

/// Resolved settings plus the project directory.
///
/// Frontends build this once per invocation and hand it to commands.
#[derive(Debug, Clone)]
pub struct AppContext {
    project_root: PathBuf,
    settings: Settings,
}

impl AppContext {
    pub fn new(project_root: PathBuf, settings: Settings) -> Self {
        Self {
            project_root,
            settings,
        }
    }

    /// Context from the process environment and current directory.
    pub fn from_env() -> anyhow::Result<Self> {
        let settings = Settings::load()?;
        let project_root = std::env::current_dir()?;
        Ok(Self::new(project_root, settings))
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn scope_paths(&self, scope: Scope) -> ScopePaths {
        paths_for_scope(scope, &self.settings.workspace_root(), &self.project_root)
    }

    /// Get a SkillManager for the given scope.
    pub fn skill_manager(&self, scope: Scope) -> SkillManager {
        SkillManager::new(scope, self.scope_paths(scope))
    }

    pub fn registry_client(&self) -> Result<RegistryClient> {
        RegistryClient::new(&self.settings.api_base, self.settings.api_key.clone())
    }

    pub fn fetcher(&self) -> Result<Fetcher> {
        Ok(Fetcher::new(
            HostedFetcher::new()?,
            RegistryFetcher::new(self.registry_client()?),
        ))
    }
}
