//! SKILL.md parsing and generation.
//!
//! A document is a YAML header bounded by `---` lines followed by a free-text
//! body. Generation is lossy with respect to formatting (comments, key order,
//! blank lines) but keeps every defined field and its normalized value.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

use super::frontmatter::Frontmatter;

/// File name of the primary document inside a skill directory.
pub const SKILL_FILE: &str = "SKILL.md";

const DELIMITER: &str = "---";

/// A parsed skill document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillDocument {
    pub frontmatter: Frontmatter,
    pub body: String,
    /// Path of the file the document was read from.
    pub path: PathBuf,
}

/// Read and validate the document at `path`.
pub fn parse(path: &Path) -> Result<SkillDocument> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse_str(&content, path)
}

/// Validate document text. `path` is recorded on the result only.
pub fn parse_str(content: &str, path: &Path) -> Result<SkillDocument> {
    let (yaml, body) = split_frontmatter(content)?;
    let frontmatter = Frontmatter::from_yaml(yaml)?;

    if body.trim().is_empty() {
        return Err(Error::Validation("skill body is empty".to_string()));
    }

    Ok(SkillDocument {
        frontmatter,
        body: body.to_string(),
        path: path.to_path_buf(),
    })
}

/// Render a header and body back into document text.
pub fn generate(frontmatter: &Frontmatter, body: &str) -> Result<String> {
    let yaml = frontmatter.to_yaml()?;
    Ok(format!("{DELIMITER}\n{yaml}{DELIMITER}\n\n{body}"))
}

/// Split document text into `(header_yaml, body)`.
///
/// The first line must be the opening delimiter. Blank lines between the
/// closing delimiter and the body are dropped.
pub fn split_frontmatter(content: &str) -> Result<(&str, &str)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut lines = content.split_inclusive('\n');
    let first = lines
        .next()
        .ok_or_else(|| Error::Validation("document is empty".to_string()))?;
    if first.trim_end() != DELIMITER {
        return Err(Error::Validation(
            "SKILL.md must start with a --- frontmatter block".to_string(),
        ));
    }

    let header_start = first.len();
    let mut offset = header_start;
    for line in lines {
        if line.trim_end() == DELIMITER {
            let yaml = &content[header_start..offset];
            let body = content[offset + line.len()..].trim_start_matches(['\r', '\n']);
            return Ok((yaml, body));
        }
        offset += line.len();
    }

    Err(Error::Validation(
        "SKILL.md frontmatter is not closed with ---".to_string(),
    ))
}

/// Read the header's `name` key without validating the rest.
///
/// Used by fetchers to name content before it is validated.
pub fn extract_name(content: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct NameOnly {
        name: Option<String>,
    }

    let (yaml, _) = split_frontmatter(content).ok()?;
    let header: NameOnly = serde_yaml::from_str(yaml).ok()?;
    let name = header.name?.trim().to_string();
    (!name.is_empty()).then_some(name)
}
