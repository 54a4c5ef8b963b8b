//! Uninstall command implementation.

use std::path::PathBuf;

use crate::context::AppContext;
use crate::error::Result;
use crate::skills::SkillManager;
use crate::types::Scope;

/// Report from an uninstall operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UninstallReport {
    pub name: String,
    /// Removed skill directory
    pub path: PathBuf,
    /// Whether a lock file entry existed and was removed
    pub had_lock_entry: bool,
}

#[derive(Debug, Clone)]
pub struct UninstallCommand {
    manager: SkillManager,
}

impl UninstallCommand {
    pub fn new(manager: SkillManager) -> Self {
        Self { manager }
    }

    pub fn from_context(ctx: &AppContext, scope: Scope) -> Self {
        Self::new(ctx.skill_manager(scope))
    }

    pub fn execute(&self, name: &str) -> Result<UninstallReport> {
        let had_lock_entry = self.manager.manifest().get(name).is_some();
        self.manager.uninstall(name)?;
        Ok(UninstallReport {
            name: name.to_string(),
            path: self.manager.skill_dir(name),
            had_lock_entry,
        })
    }
}
