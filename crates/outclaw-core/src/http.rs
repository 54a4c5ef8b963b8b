//! Shared HTTP plumbing for the fetchers and the registry client.
//!
//! One attempt per request: no retry, no timeout beyond reqwest's defaults.

use reqwest::{Response, StatusCode};

use crate::error::{Error, Result};
use crate::registry::schema::ErrorBody;

const USER_AGENT: &str = concat!("outclaw/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client used for every outgoing request.
pub fn client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| Error::Config(format!("cannot build HTTP client: {e}")))
}

/// Pass successful responses through; map failures onto the error taxonomy.
///
/// A 404 becomes `NotFound(what)`. Anything else becomes `Transport`, with the
/// upstream error code when the body carries one. Send and decode failures
/// reach callers as `Transport` through `From<reqwest::Error>`.
pub async fn ensure_success(response: Response, what: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::NOT_FOUND {
        return Err(Error::NotFound(what.to_string()));
    }

    let url = response.url().to_string();
    let code = response
        .text()
        .await
        .ok()
        .and_then(|body| serde_json::from_str::<ErrorBody>(&body).ok())
        .and_then(|body| body.error.code);

    Err(Error::Transport {
        status: Some(status.as_u16()),
        code,
        url,
        source: None,
    })
}
