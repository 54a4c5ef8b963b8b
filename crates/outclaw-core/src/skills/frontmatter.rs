//! SKILL.md frontmatter schema.
//!
//! Field declaration order is the order fields are written back out by
//! [`crate::skills::document::generate`].

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};

/// Minimum length of a skill description.
pub const MIN_DESCRIPTION_LEN: usize = 10;

const MAX_NAME_LEN: usize = 64;

/// Validated skill header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Frontmatter {
    pub name: String,

    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub argument_hint: Option<String>,

    /// Accepts either a YAML list or a comma-separated string.
    #[serde(
        default,
        deserialize_with = "deserialize_tool_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub allowed_tools: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<ContextMode>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub disable_model_invocation: bool,

    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub user_invocable: bool,
}

/// Execution context requested by a skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextMode {
    Normal,
    Fork,
}

/// Skill author, either a bare name or a structured record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Author {
    Name(String),
    Detailed {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        email: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url: Option<String>,
    },
}

impl Author {
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::Detailed { name, .. } => name,
        }
    }
}

impl Frontmatter {
    /// Create a header with only the required fields set.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            version: None,
            license: None,
            author: None,
            repository: None,
            keywords: None,
            argument_hint: None,
            allowed_tools: Vec::new(),
            model: None,
            context: None,
            agent: None,
            disable_model_invocation: false,
            user_invocable: true,
        }
    }

    /// Deserialize and validate a YAML header block.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let frontmatter: Frontmatter = serde_yaml::from_str(yaml)
            .map_err(|e| Error::Validation(format!("invalid frontmatter: {e}")))?;
        frontmatter.validate()?;
        Ok(frontmatter)
    }

    /// Serialize to YAML, omitting unset optional fields.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| Error::Validation(format!("cannot serialize frontmatter: {e}")))
    }

    /// Check the schema rules. Returns the first violation.
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;

        if self.description.trim().chars().count() < MIN_DESCRIPTION_LEN {
            return Err(Error::Validation(format!(
                "description must be at least {MIN_DESCRIPTION_LEN} characters"
            )));
        }

        if let Some(version) = &self.version {
            semver::Version::parse(version).map_err(|e| {
                Error::Validation(format!("version '{version}' is not semver: {e}"))
            })?;
        }

        Ok(())
    }
}

/// Validate a skill name: lowercase ASCII alphanumerics and hyphens, 1-64 chars.
pub fn validate_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name.len() <= MAX_NAME_LEN
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && !name.starts_with('-')
        && !name.ends_with('-')
        && !name.contains("--");

    if valid {
        Ok(())
    } else {
        Err(Error::Validation(format!(
            "invalid skill name '{name}': must be 1-{MAX_NAME_LEN} lowercase alphanumeric/hyphen chars"
        )))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ToolList {
    Joined(String),
    Items(Vec<String>),
}

fn deserialize_tool_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let tools = match Option::<ToolList>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(ToolList::Joined(joined)) => joined.split(',').map(str::to_string).collect(),
        Some(ToolList::Items(items)) => items,
    };
    Ok(tools
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect())
}

fn default_true() -> bool {
    true
}

fn is_true(value: &bool) -> bool {
    *value
}

fn is_false(value: &bool) -> bool {
    !*value
}
