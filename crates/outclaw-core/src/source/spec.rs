//! Source specifier types.

use serde::Serialize;

/// Host token that marks a hosted-repository URL.
pub const HOSTED_SITE: &str = "github.com";

/// Branch used when a hosted reference does not name one.
pub const DEFAULT_REF: &str = "main";

/// A classified specifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Specifier {
    /// A skill inside a hosted repository (`owner/repo[@ref][/subpath]`)
    Hosted(HostedRef),
    /// Any other http(s) URL
    Url { url: String },
    /// A filesystem path
    Local { path: String },
    /// A registry id or a slug/search term
    Registry { id_or_slug: String },
}

impl Specifier {
    /// Short label for the variant, used in messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Hosted(_) => "hosted",
            Self::Url { .. } => "url",
            Self::Local { .. } => "local",
            Self::Registry { .. } => "registry",
        }
    }
}

/// Location of a skill inside a hosted repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostedRef {
    pub owner: String,
    pub repo: String,
    /// Branch, tag or commit. Left unset when not given.
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Directory inside the repository containing SKILL.md
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subpath: Option<String>,
}

impl HostedRef {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            reference: None,
            subpath: None,
        }
    }

    /// Set the git reference (branch, tag, or commit).
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Set the subdirectory path.
    pub fn with_subpath(mut self, subpath: impl Into<String>) -> Self {
        self.subpath = Some(subpath.into());
        self
    }

    /// The reference to fetch, defaulting to [`DEFAULT_REF`].
    pub fn reference_or_default(&self) -> &str {
        self.reference.as_deref().unwrap_or(DEFAULT_REF)
    }

    /// Browser URL of the repository.
    pub fn repo_url(&self) -> String {
        format!("https://{HOSTED_SITE}/{}/{}", self.owner, self.repo)
    }
}
