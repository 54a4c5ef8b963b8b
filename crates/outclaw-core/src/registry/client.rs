//! HTTP client for the remote skill registry.
//!
//! Consumed endpoints, relative to the configured base URL:
//! - `GET api/v1/skills?q=&limit=&sort=[&community=true]` search
//! - `GET api/v1/skills/<id>` listing record
//! - `GET api/v1/skills/<id>/download` SKILL.md text, bearer auth required

use reqwest::header::AUTHORIZATION;
use url::Url;

use crate::error::{Error, Result};
use crate::http;

use super::schema::{SearchOptions, SearchPage, SkillSummary};

const API_PATH: [&str; 3] = ["api", "v1", "skills"];

/// Registry API client.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    http: reqwest::Client,
    base: Url,
    api_key: Option<String>,
}

impl RegistryClient {
    pub fn new(base: &str, api_key: Option<String>) -> Result<Self> {
        let base = Url::parse(base)
            .map_err(|e| Error::Config(format!("registry URL '{base}': {e}")))?;
        if base.cannot_be_a_base() {
            return Err(Error::Config(format!("registry URL '{base}' cannot be a base")));
        }
        Ok(Self {
            http: http::client()?,
            base,
            api_key,
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Search listings.
    pub async fn search(&self, term: &str, options: &SearchOptions) -> Result<SearchPage> {
        let mut url = self.endpoint(&[]);
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("q", term)
                .append_pair("limit", &options.limit.to_string())
                .append_pair("sort", options.sort.as_str());
            if options.community {
                query.append_pair("community", "true");
            }
        }

        tracing::debug!(%url, "searching registry");
        let response = self.http.get(url).send().await?;
        let response = http::ensure_success(response, term).await?;
        Ok(response.json().await?)
    }

    /// Fetch one listing by id.
    pub async fn get(&self, id: &str) -> Result<SkillSummary> {
        let url = self.endpoint(&[id]);
        tracing::debug!(%url, "fetching registry record");
        let response = self.http.get(url).send().await?;
        let response = http::ensure_success(response, id).await?;
        Ok(response.json().await?)
    }

    /// Download the SKILL.md text for `id`.
    pub async fn download(&self, id: &str) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| Error::AuthRequired(format!("downloading {id}")))?;

        let url = self.endpoint(&[id, "download"]);
        tracing::debug!(%url, "downloading from registry");
        let response = self
            .http
            .get(url)
            .header(AUTHORIZATION, format!("Bearer {api_key}"))
            .send()
            .await?;
        let response = http::ensure_success(response, id).await?;
        Ok(response.text().await?)
    }

    fn endpoint(&self, extra: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(API_PATH).extend(extra);
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;

    use super::*;
    use crate::registry::schema::SearchSort;

    #[test]
    fn endpoint_keeps_base_path() {
        let client = RegistryClient::new("https://example.test/mirror/", None).unwrap();
        assert_eq!(
            client.endpoint(&["abc", "download"]).as_str(),
            "https://example.test/mirror/api/v1/skills/abc/download"
        );
    }

    #[test]
    fn rejects_malformed_base() {
        assert!(matches!(
            RegistryClient::new("not a url", None),
            Err(Error::Config(_))
        ));
    }

    #[tokio::test]
    async fn search_sends_query_parameters() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/skills")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("q".into(), "pdf tools".into()),
                Matcher::UrlEncoded("limit".into(), "3".into()),
                Matcher::UrlEncoded("sort".into(), "downloads".into()),
                Matcher::UrlEncoded("community".into(), "true".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                serde_json::json!({
                    "items": [{"id": "1", "slug": "pdf", "title": "PDF"}],
                    "page": 1,
                    "total": 1
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = RegistryClient::new(&server.url(), None).unwrap();
        let options = SearchOptions {
            limit: 3,
            sort: SearchSort::Downloads,
            community: true,
        };
        let page = client.search("pdf tools", &options).await.unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].slug, "pdf");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn get_maps_404_to_not_found() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v1/skills/missing")
            .with_status(404)
            .create_async()
            .await;

        let client = RegistryClient::new(&server.url(), None).unwrap();
        let err = client.get("missing").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(id) if id == "missing"));
    }

    #[tokio::test]
    async fn download_requires_api_key() {
        let client = RegistryClient::new("https://registry.invalid", None).unwrap();
        let err = client.download("abc").await.unwrap_err();
        assert!(matches!(err, Error::AuthRequired(_)));
    }

    #[tokio::test]
    async fn download_sends_bearer_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/skills/abc/download")
            .match_header("authorization", "Bearer secret")
            .with_status(200)
            .with_body("---\nname: demo\n---\nbody\n")
            .create_async()
            .await;

        let client = RegistryClient::new(&server.url(), Some("secret".to_string())).unwrap();
        let content = client.download("abc").await.unwrap();
        assert!(content.contains("name: demo"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn error_body_code_is_carried() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v1/skills/abc/download")
            .with_status(403)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":{"code":"forbidden","message":"nope"}}"#)
            .create_async()
            .await;

        let client = RegistryClient::new(&server.url(), Some("secret".to_string())).unwrap();
        let err = client.download("abc").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Transport { status: Some(403), code: Some(ref code), .. } if code == "forbidden"
        ));
    }
}
