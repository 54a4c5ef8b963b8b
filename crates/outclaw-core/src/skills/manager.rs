//! On-disk skill registry for one scope.
//!
//! Layout: `<skills_dir>/<name>/SKILL.md`, plus the scope's lock file. The
//! two are updated one after the other, not transactionally: an interrupted
//! install can leave a directory without a lock entry, and a directory
//! without a valid SKILL.md is simply not listed.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ScopePaths;
use crate::error::{Error, Result};
use crate::lockfile::{LockfileStore, Manifest, ManifestEntry, ManifestSource};
use crate::types::Scope;

use super::document::{self, SKILL_FILE, SkillDocument};
use super::frontmatter::{Author, Frontmatter, validate_name};

/// A valid installed skill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillInfo {
    pub name: String,
    pub description: String,
    pub version: Option<String>,
    /// Skill directory
    pub path: PathBuf,
    pub frontmatter: Frontmatter,
}

impl SkillInfo {
    fn from_document(doc: SkillDocument, dir: &Path) -> Self {
        Self {
            name: doc.frontmatter.name.clone(),
            description: doc.frontmatter.description.clone(),
            version: doc.frontmatter.version.clone(),
            path: dir.to_path_buf(),
            frontmatter: doc.frontmatter,
        }
    }
}

/// Options for scaffolding a new skill.
#[derive(Debug, Clone)]
pub struct CreateOptions {
    pub frontmatter: Frontmatter,
    /// Body text; a placeholder is generated when unset
    pub body: Option<String>,
}

impl CreateOptions {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            frontmatter: Frontmatter::new(name, description),
            body: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.frontmatter.version = Some(version.into());
        self
    }

    pub fn with_license(mut self, license: impl Into<String>) -> Self {
        self.frontmatter.license = Some(license.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.frontmatter.author = Some(Author::Name(author.into()));
        self
    }

    pub fn with_allowed_tools(mut self, tools: Vec<String>) -> Self {
        self.frontmatter.allowed_tools = tools;
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Options for installing fetched content.
#[derive(Debug, Clone)]
pub struct InstallOptions {
    /// Replace an existing skill directory
    pub force: bool,
    /// Provenance recorded in the lock file
    pub source: ManifestSource,
}

impl InstallOptions {
    pub fn new(source: ManifestSource) -> Self {
        Self {
            force: false,
            source,
        }
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}

/// Manager for one scope's skills directory and lock file.
#[derive(Debug, Clone)]
pub struct SkillManager {
    scope: Scope,
    skills_dir: PathBuf,
    lockfile: LockfileStore,
}

impl SkillManager {
    pub fn new(scope: Scope, paths: ScopePaths) -> Self {
        Self {
            scope,
            skills_dir: paths.skills_dir,
            lockfile: LockfileStore::new(paths.lock_path),
        }
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn skills_dir(&self) -> &Path {
        &self.skills_dir
    }

    pub fn lock_path(&self) -> &Path {
        self.lockfile.path()
    }

    /// Directory a skill named `name` lives in.
    pub fn skill_dir(&self, name: &str) -> PathBuf {
        self.skills_dir.join(name)
    }

    /// All valid skills, sorted by name. Invalid directories are skipped.
    pub fn list(&self) -> Result<Vec<SkillInfo>> {
        let entries = match fs::read_dir(&self.skills_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Error::io(&self.skills_dir, e)),
        };

        let mut skills = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::io(&self.skills_dir, e))?;
            if entry.file_name().to_string_lossy().starts_with('.') {
                continue;
            }
            let dir = entry.path();
            if !dir.is_dir() {
                continue;
            }
            match document::parse(&dir.join(SKILL_FILE)) {
                Ok(doc) => skills.push(SkillInfo::from_document(doc, &dir)),
                Err(e) => tracing::debug!(path = %dir.display(), error = %e, "skipping invalid skill"),
            }
        }

        skills.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(skills)
    }

    /// The skill named `name`, or `None` when absent or invalid.
    pub fn get(&self, name: &str) -> Option<SkillInfo> {
        validate_name(name).ok()?;
        let dir = self.skill_dir(name);
        let doc = document::parse(&dir.join(SKILL_FILE)).ok()?;
        Some(SkillInfo::from_document(doc, &dir))
    }

    /// True iff `<skills_dir>/<name>/SKILL.md` is present.
    pub fn exists(&self, name: &str) -> bool {
        validate_name(name).is_ok() && self.skill_dir(name).join(SKILL_FILE).is_file()
    }

    /// Scaffold a new skill. Does not touch the lock file.
    pub fn create(&self, options: CreateOptions) -> Result<PathBuf> {
        let CreateOptions { frontmatter, body } = options;
        frontmatter.validate()?;

        let dir = self.skill_dir(&frontmatter.name);
        if dir.exists() {
            return Err(Error::Conflict(dir));
        }

        let body = body.unwrap_or_else(|| placeholder_body(&frontmatter));
        if body.trim().is_empty() {
            return Err(Error::Validation("skill body is empty".to_string()));
        }
        let content = document::generate(&frontmatter, &body)?;

        fs::create_dir_all(&dir).map_err(|e| Error::io(&dir, e))?;
        let file = dir.join(SKILL_FILE);
        fs::write(&file, content).map_err(|e| Error::io(&file, e))?;

        tracing::info!(name = %frontmatter.name, scope = %self.scope, "created skill");
        Ok(dir)
    }

    /// Write `content` as the skill `name` and record it in the lock file.
    ///
    /// Content is validated before anything touches the disk and is then
    /// written verbatim. The header name must equal `name`.
    pub fn install(&self, name: &str, content: &str, options: InstallOptions) -> Result<PathBuf> {
        validate_name(name)?;
        let dir = self.skill_dir(name);
        let file = dir.join(SKILL_FILE);
        let doc = document::parse_str(content, &file)?;
        if doc.frontmatter.name != name {
            return Err(Error::Validation(format!(
                "header names the skill '{}' but it is being installed as '{name}'",
                doc.frontmatter.name
            )));
        }

        if dir.exists() {
            if !options.force {
                return Err(Error::Conflict(dir));
            }
            fs::remove_dir_all(&dir).map_err(|e| Error::io(&dir, e))?;
        }

        fs::create_dir_all(&dir).map_err(|e| Error::io(&dir, e))?;
        fs::write(&file, content).map_err(|e| Error::io(&file, e))?;

        let entry = ManifestEntry::installed_now(name, options.source, self.scope);
        self.lockfile.update(|manifest| manifest.upsert(entry))?;

        tracing::info!(name, scope = %self.scope, path = %dir.display(), "installed skill");
        Ok(dir)
    }

    /// Remove the skill directory and its lock file entry.
    pub fn uninstall(&self, name: &str) -> Result<()> {
        validate_name(name)?;
        let dir = self.skill_dir(name);
        if !dir.exists() {
            return Err(Error::NotFound(name.to_string()));
        }

        fs::remove_dir_all(&dir).map_err(|e| Error::io(&dir, e))?;
        let removed = self.lockfile.remove(name)?;

        tracing::info!(name, scope = %self.scope, lock_entry = removed, "uninstalled skill");
        Ok(())
    }

    /// Current lock file contents; empty when missing or unreadable.
    pub fn manifest(&self) -> Manifest {
        self.lockfile.load()
    }
}

fn placeholder_body(frontmatter: &Frontmatter) -> String {
    format!(
        "# {}\n\n{}\n\n## Instructions\n\nDescribe how to use this skill.\n",
        frontmatter.name, frontmatter.description
    )
}
