//! Skills management

pub mod document;
pub mod frontmatter;
pub mod manager;

pub use document::{SKILL_FILE, SkillDocument, generate, parse, parse_str};
pub use frontmatter::{Author, ContextMode, Frontmatter, validate_name};
pub use manager::{CreateOptions, InstallOptions, SkillInfo, SkillManager};
