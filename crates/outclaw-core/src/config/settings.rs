//! User configuration: `config.json` plus environment overrides.
//!
//! Resolved once per invocation; nothing here is cached process-wide.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Overrides the config file location.
pub const ENV_CONFIG_PATH: &str = "OUTCLAW_CONFIG_PATH";
/// Overrides the state directory (`~/.outclaw`).
pub const ENV_STATE_DIR: &str = "OUTCLAW_STATE_DIR";
/// Overrides the registry base URL.
pub const ENV_API_BASE: &str = "OUTCLAW_API_BASE";
/// Overrides the registry API key.
pub const ENV_API_KEY: &str = "OUTCLAW_API_KEY";

pub const DEFAULT_API_BASE: &str = "https://registry.outclaw.dev";

const STATE_DIR_NAME: &str = ".outclaw";
const CONFIG_FILE_NAME: &str = "config.json";
const WORKSPACE_DIR_NAME: &str = "workspace";

/// On-disk shape of `config.json`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// Effective settings after applying environment overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub home_dir: PathBuf,
    pub state_dir: PathBuf,
    pub config_path: PathBuf,
    /// Configured workspace root, if any
    pub workspace: Option<PathBuf>,
    pub api_base: String,
    pub api_key: Option<String>,
}

impl Settings {
    /// Load from the process environment and the user's home directory.
    pub fn load() -> anyhow::Result<Self> {
        let home_dir = dirs::home_dir().context("Could not determine home directory")?;
        Ok(Self::from_env(&home_dir, |key| std::env::var(key).ok()))
    }

    /// Load with an injected environment lookup.
    pub fn from_env(home_dir: &Path, env: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |key: &str| env(key).and_then(|v| trimmed(&v));

        let state_dir = lookup(ENV_STATE_DIR)
            .map(|dir| expand_home(&dir, home_dir))
            .unwrap_or_else(|| home_dir.join(STATE_DIR_NAME));
        let config_path = lookup(ENV_CONFIG_PATH)
            .map(|path| expand_home(&path, home_dir))
            .unwrap_or_else(|| state_dir.join(CONFIG_FILE_NAME));

        let file = read_config_file(&config_path);

        let workspace = file
            .workspace
            .as_deref()
            .and_then(trimmed)
            .map(|ws| expand_home(&ws, home_dir));
        let api_base = lookup(ENV_API_BASE)
            .or_else(|| file.api_base.as_deref().and_then(trimmed))
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let api_key = lookup(ENV_API_KEY).or_else(|| file.api_key.as_deref().and_then(trimmed));

        Self {
            home_dir: home_dir.to_path_buf(),
            state_dir,
            config_path,
            workspace,
            api_base,
            api_key,
        }
    }

    /// Root of the global scope: the configured workspace or `<state>/workspace`.
    pub fn workspace_root(&self) -> PathBuf {
        self.workspace
            .clone()
            .unwrap_or_else(|| self.state_dir.join(WORKSPACE_DIR_NAME))
    }
}

/// Read `config.json`. Absent or broken files yield the defaults.
pub fn read_config_file(path: &Path) -> ConfigFile {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return ConfigFile::default(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot read config file");
            return ConfigFile::default();
        }
    };
    serde_json::from_str(&content).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), error = %e, "ignoring unparsable config file");
        ConfigFile::default()
    })
}

fn trimmed(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn expand_home(path: &str, home_dir: &Path) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => home_dir.join(rest),
        None if path == "~" => home_dir.to_path_buf(),
        None => PathBuf::from(path),
    }
}
