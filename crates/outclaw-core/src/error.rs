//! Error taxonomy shared by the fetchers, the remote registry client and the
//! skill manager.
//!
//! Callers are expected to match on the variant to decide messaging and exit
//! behavior; the core never prints.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the resolution, fetch and registry layers.
#[derive(Debug, Error)]
pub enum Error {
    /// A named skill or registry entry is absent.
    #[error("not found: {0}")]
    NotFound(String),

    /// The target already exists and `force` was not given.
    #[error("already exists: {}", .0.display())]
    Conflict(PathBuf),

    /// A skill header failed schema validation. Carries the first violation.
    #[error("invalid skill: {0}")]
    Validation(String),

    /// A registry operation needs an API key and none is configured.
    #[error("registry credential required for {0}")]
    AuthRequired(String),

    /// Non-success HTTP status, or a network failure before any status
    /// (`status: None`).
    #[error("{}", transport_message(.status, .code, .url))]
    Transport {
        status: Option<u16>,
        code: Option<String>,
        url: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// The source kind is recognized but has no fetcher.
    #[error("{0} sources are not supported yet")]
    NotSupported(&'static str),

    /// Unusable configuration value, such as a malformed registry URL.
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(source: reqwest::Error) -> Self {
        Self::Transport {
            status: source.status().map(|s| s.as_u16()),
            code: None,
            url: source.url().map(|u| u.to_string()).unwrap_or_default(),
            source: Some(source),
        }
    }
}

fn transport_message(status: &Option<u16>, code: &Option<String>, url: &str) -> String {
    let mut message = match status {
        Some(status) => format!("HTTP {status} from {url}"),
        None => format!("request to {url} failed"),
    };
    if let Some(code) = code {
        message.push_str(&format!(" ({code})"));
    }
    message
}

pub type Result<T> = std::result::Result<T, Error>;
