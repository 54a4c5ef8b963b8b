//! Fetch SKILL.md from a hosted repository over raw-content HTTP.

use crate::error::Result;
use crate::http;
use crate::skills::document::{SKILL_FILE, extract_name};
use crate::source::HostedRef;

use super::FetchedSkill;

/// Raw file host for hosted repositories.
pub const RAW_CONTENT_BASE: &str = "https://raw.githubusercontent.com";

/// Fetches skills straight from a repository's raw file endpoint.
#[derive(Debug, Clone)]
pub struct HostedFetcher {
    http: reqwest::Client,
    raw_base: String,
}

impl HostedFetcher {
    pub fn new() -> Result<Self> {
        Self::with_raw_base(RAW_CONTENT_BASE)
    }

    /// Use a different raw-content host (mirrors, tests).
    pub fn with_raw_base(raw_base: impl Into<String>) -> Result<Self> {
        Ok(Self {
            http: http::client()?,
            raw_base: raw_base.into().trim_end_matches('/').to_string(),
        })
    }

    /// Construct the raw URL of the skill's SKILL.md.
    ///
    /// `<base>/<owner>/<repo>/<ref>/[<subpath>/]SKILL.md`, with the ref
    /// defaulting to `main`.
    pub fn raw_url(&self, spec: &HostedRef) -> String {
        let mut url = format!(
            "{}/{}/{}/{}",
            self.raw_base,
            spec.owner,
            spec.repo,
            spec.reference_or_default()
        );
        if let Some(subpath) = spec.subpath.as_deref().map(|p| p.trim_matches('/'))
            && !subpath.is_empty()
        {
            url.push('/');
            url.push_str(subpath);
        }
        url.push('/');
        url.push_str(SKILL_FILE);
        url
    }

    pub async fn fetch(&self, spec: &HostedRef) -> Result<FetchedSkill> {
        let url = self.raw_url(spec);
        tracing::debug!(%url, "fetching hosted skill");

        let response = self.http.get(&url).send().await?;
        let response = http::ensure_success(response, &url).await?;
        let content = response.text().await?;

        let name = extract_name(&content).unwrap_or_else(|| spec.repo.clone());
        Ok(FetchedSkill::new(name, content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn raw_url_defaults_to_main() {
        let fetcher = HostedFetcher::new().unwrap();
        let url = fetcher.raw_url(&HostedRef::new("acme", "widgets"));
        assert_eq!(
            url,
            "https://raw.githubusercontent.com/acme/widgets/main/SKILL.md"
        );
    }

    #[test]
    fn raw_url_with_ref_and_subpath() {
        let fetcher = HostedFetcher::new().unwrap();
        let spec = HostedRef::new("acme", "widgets")
            .with_reference("v2")
            .with_subpath("tools/lint/");
        assert_eq!(
            fetcher.raw_url(&spec),
            "https://raw.githubusercontent.com/acme/widgets/v2/tools/lint/SKILL.md"
        );
    }

    #[tokio::test]
    async fn fetch_names_skill_from_header() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/acme/widgets/main/skills/lint/SKILL.md")
            .with_status(200)
            .with_body("---\nname: lint-helper\ndescription: Lints things nicely\n---\nBody\n")
            .create_async()
            .await;

        let fetcher = HostedFetcher::with_raw_base(server.url()).unwrap();
        let spec = HostedRef::new("acme", "widgets").with_subpath("skills/lint");
        let fetched = fetcher.fetch(&spec).await.unwrap();

        assert_eq!(fetched.name, "lint-helper");
        assert_eq!(fetched.registry_id, None);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn fetch_falls_back_to_repo_name() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/acme/widgets/main/SKILL.md")
            .with_status(200)
            .with_body("no header here")
            .create_async()
            .await;

        let fetcher = HostedFetcher::with_raw_base(server.url()).unwrap();
        let fetched = fetcher.fetch(&HostedRef::new("acme", "widgets")).await.unwrap();
        assert_eq!(fetched.name, "widgets");
    }

    #[tokio::test]
    async fn fetch_names_skill_past_header_comment() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/acme/tools/main/SKILL.md")
            .with_status(200)
            .with_body("---\nname: widgets # the widget skill\ndescription: Widget helpers\n---\nBody\n")
            .create_async()
            .await;

        let fetcher = HostedFetcher::with_raw_base(server.url()).unwrap();
        let fetched = fetcher.fetch(&HostedRef::new("acme", "tools")).await.unwrap();
        assert_eq!(fetched.name, "widgets");
    }

    #[tokio::test]
    async fn unreachable_host_is_transport_error() {
        let fetcher = HostedFetcher::with_raw_base("http://127.0.0.1:1").unwrap();
        let err = fetcher
            .fetch(&HostedRef::new("acme", "widgets"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Transport { status: None, .. }));
    }

    #[tokio::test]
    async fn fetch_maps_404_and_other_statuses() {
        let mut server = mockito::Server::new_async().await;
        let _missing = server
            .mock("GET", "/acme/missing/main/SKILL.md")
            .with_status(404)
            .create_async()
            .await;
        let _broken = server
            .mock("GET", "/acme/broken/main/SKILL.md")
            .with_status(502)
            .create_async()
            .await;

        let fetcher = HostedFetcher::with_raw_base(server.url()).unwrap();

        let err = fetcher
            .fetch(&HostedRef::new("acme", "missing"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));

        let err = fetcher
            .fetch(&HostedRef::new("acme", "broken"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Transport { status: Some(502), code: None, .. }));
    }
}
