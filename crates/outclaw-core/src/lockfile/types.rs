//! Lock file types for installed skills.
//!
//! One manifest per scope, holding at most one entry per skill name.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::source::Specifier;
use crate::types::Scope;

/// Current manifest format version.
pub const MANIFEST_VERSION: u32 = 1;

/// Version recorded for freshly installed content.
pub const INSTALLED_VERSION: &str = "1.0.0";

/// Installed skills for one scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Manifest format version
    pub version: u32,

    #[serde(default)]
    pub skills: Vec<ManifestEntry>,
}

impl Manifest {
    /// Create an empty manifest
    pub fn new() -> Self {
        Self {
            version: MANIFEST_VERSION,
            skills: Vec::new(),
        }
    }

    /// Insert or replace the entry with the same name, keeping its position.
    pub fn upsert(&mut self, entry: ManifestEntry) {
        match self.skills.iter_mut().find(|e| e.name == entry.name) {
            Some(existing) => *existing = entry,
            None => self.skills.push(entry),
        }
    }

    /// Remove the entry for `name`. Returns it if it was present.
    pub fn remove(&mut self, name: &str) -> Option<ManifestEntry> {
        let index = self.skills.iter().position(|e| e.name == name)?;
        Some(self.skills.remove(index))
    }

    pub fn get(&self, name: &str) -> Option<&ManifestEntry> {
        self.skills.iter().find(|e| e.name == name)
    }
}

impl Default for Manifest {
    fn default() -> Self {
        Self::new()
    }
}

/// A single installed skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    pub name: String,
    pub version: String,
    pub installed_at: DateTime<Utc>,
    pub source: ManifestSource,
    pub scope: Scope,
}

impl ManifestEntry {
    /// Entry for content installed now.
    pub fn installed_now(name: impl Into<String>, source: ManifestSource, scope: Scope) -> Self {
        Self {
            name: name.into(),
            version: INSTALLED_VERSION.to_string(),
            installed_at: Utc::now(),
            source,
            scope,
        }
    }
}

/// Kind of source a skill was installed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Registry,
    Github,
    Git,
    Local,
    Url,
}

/// Provenance of an installed skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestSource {
    #[serde(rename = "type")]
    pub kind: SourceType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, rename = "ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl ManifestSource {
    fn bare(kind: SourceType) -> Self {
        Self {
            kind,
            url: None,
            reference: None,
            id: None,
        }
    }

    pub fn registry(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::bare(SourceType::Registry)
        }
    }

    pub fn github(url: impl Into<String>, reference: Option<String>) -> Self {
        Self {
            url: Some(url.into()),
            reference,
            ..Self::bare(SourceType::Github)
        }
    }

    pub fn url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::bare(SourceType::Url)
        }
    }

    pub fn local(path: impl Into<String>) -> Self {
        Self {
            url: Some(path.into()),
            ..Self::bare(SourceType::Local)
        }
    }

    /// Provenance for content fetched from `spec`.
    ///
    /// `registry_id` is the canonical id a registry fetch resolved to; it wins
    /// over the slug the user typed.
    pub fn from_specifier(spec: &Specifier, registry_id: Option<&str>) -> Self {
        match spec {
            Specifier::Hosted(hosted) => Self::github(hosted.repo_url(), hosted.reference.clone()),
            Specifier::Url { url } => Self::url(url.clone()),
            Specifier::Local { path } => Self::local(path.clone()),
            Specifier::Registry { id_or_slug } => {
                Self::registry(registry_id.unwrap_or(id_or_slug))
            }
        }
    }
}
