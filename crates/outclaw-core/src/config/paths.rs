//! Scope path resolution helpers.

use std::path::{Path, PathBuf};

use crate::types::Scope;

/// Directory holding project-scope state.
pub const PROJECT_STATE_DIR: &str = ".outclaw";
pub const SKILLS_DIR: &str = "skills";
pub const LOCK_FILE: &str = "lock.json";

/// Skills directory and lock file for one scope.
///
/// The two are siblings on disk but addressed independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopePaths {
    pub skills_dir: PathBuf,
    pub lock_path: PathBuf,
}

pub fn paths_for_scope(scope: Scope, workspace_root: &Path, project_root: &Path) -> ScopePaths {
    match scope {
        Scope::Global => ScopePaths {
            skills_dir: workspace_root.join(SKILLS_DIR),
            lock_path: workspace_root.join(LOCK_FILE),
        },
        Scope::Project => ScopePaths {
            skills_dir: project_root.join(SKILLS_DIR),
            lock_path: project_root.join(PROJECT_STATE_DIR).join(LOCK_FILE),
        },
    }
}
