//! Fetch skills from the remote registry by id or by slug/search term.

use crate::error::{Error, Result};
use crate::registry::{RegistryClient, SearchOptions, SkillSummary};
use crate::skills::document::extract_name;
use crate::source::is_uuid;

use super::FetchedSkill;

/// How many search results a slug lookup considers.
pub const SEARCH_LIMIT: usize = 5;

#[derive(Debug, Clone)]
pub struct RegistryFetcher {
    client: RegistryClient,
}

impl RegistryFetcher {
    pub fn new(client: RegistryClient) -> Self {
        Self { client }
    }

    /// Every path ends in an authenticated download, so a missing key fails
    /// before any request is sent.
    pub async fn fetch(&self, id_or_slug: &str) -> Result<FetchedSkill> {
        if !self.client.has_api_key() {
            return Err(Error::AuthRequired(format!("installing '{id_or_slug}'")));
        }
        if is_uuid(id_or_slug) {
            self.fetch_by_id(id_or_slug).await
        } else {
            self.fetch_by_slug(id_or_slug).await
        }
    }

    async fn fetch_by_id(&self, id: &str) -> Result<FetchedSkill> {
        let record = self.client.get(id).await?;
        let content = self.client.download(id).await?;
        Ok(named(content, &record).with_registry_id(id))
    }

    /// Search, pick a listing and download it.
    ///
    /// An exact (case-insensitive) title or slug match wins. Otherwise the
    /// first result is taken, with a warning when there was more than one.
    async fn fetch_by_slug(&self, term: &str) -> Result<FetchedSkill> {
        let options = SearchOptions::default().with_limit(SEARCH_LIMIT);
        let page = self.client.search(term, &options).await?;

        let mut warnings = Vec::new();
        let chosen = match page.items.iter().find(|item| item.matches_exactly(term)) {
            Some(exact) => exact,
            None => {
                let first = page
                    .items
                    .first()
                    .ok_or_else(|| Error::NotFound(format!("no registry skill matches '{term}'")))?;
                if page.items.len() > 1 {
                    let warning = format!(
                        "'{term}' matched {} skills without an exact match; using '{}' ({})",
                        page.items.len(),
                        first.title,
                        first.id
                    );
                    tracing::warn!("{warning}");
                    warnings.push(warning);
                }
                first
            }
        };

        let content = self.client.download(&chosen.id).await?;
        let mut fetched = named(content, chosen).with_registry_id(&chosen.id);
        fetched.warnings = warnings;
        Ok(fetched)
    }
}

/// Name fetched content from its header, else from the listing.
fn named(content: String, record: &SkillSummary) -> FetchedSkill {
    let name = extract_name(&content).unwrap_or_else(|| {
        let from_title = slugify(&record.title);
        if from_title.is_empty() {
            record.slug.clone()
        } else {
            from_title
        }
    });
    FetchedSkill::new(name, content)
}

/// Lowercase a display title into a directory-safe skill name.
fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use mockito::{Matcher, Server};

    use super::*;

    const ID: &str = "3f2504e0-4f89-41d3-9a0c-0305e82c3301";

    fn fetcher(server: &Server) -> RegistryFetcher {
        let client = RegistryClient::new(&server.url(), Some("key".to_string())).unwrap();
        RegistryFetcher::new(client)
    }

    fn summary(id: &str, slug: &str, title: &str) -> serde_json::Value {
        serde_json::json!({"id": id, "slug": slug, "title": title})
    }

    async fn mock_search(server: &mut Server, items: Vec<serde_json::Value>) -> mockito::Mock {
        server
            .mock("GET", "/api/v1/skills")
            .match_query(Matcher::UrlEncoded("limit".into(), "5".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(serde_json::json!({"items": items, "page": 1, "total": 0}).to_string())
            .create_async()
            .await
    }

    async fn mock_download(server: &mut Server, id: &str, body: &str) -> mockito::Mock {
        server
            .mock("GET", format!("/api/v1/skills/{id}/download").as_str())
            .with_status(200)
            .with_body(body)
            .create_async()
            .await
    }

    #[test]
    fn slugify_titles() {
        assert_eq!(slugify("PDF Tools"), "pdf-tools");
        assert_eq!(slugify("  Hello,  World! "), "hello-world");
        assert_eq!(slugify("***"), "");
    }

    #[tokio::test]
    async fn uuid_fetches_record_and_content() {
        let mut server = Server::new_async().await;
        let record = server
            .mock("GET", format!("/api/v1/skills/{ID}").as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(summary(ID, "pdf", "PDF Tools").to_string())
            .create_async()
            .await;
        let _download = mock_download(&mut server, ID, "no header").await;

        let fetched = fetcher(&server).fetch(ID).await.unwrap();
        assert_eq!(fetched.name, "pdf-tools");
        assert_eq!(fetched.registry_id.as_deref(), Some(ID));
        assert!(fetched.warnings.is_empty());
        record.assert_async().await;
    }

    #[tokio::test]
    async fn slug_prefers_exact_match() {
        let mut server = Server::new_async().await;
        let _search = mock_search(
            &mut server,
            vec![
                summary("1", "pdf-extra", "PDF Extra"),
                summary("2", "pdf", "PDF"),
            ],
        )
        .await;
        let _download = mock_download(&mut server, "2", "---\nname: pdf\n---\nbody").await;

        let fetched = fetcher(&server).fetch("PDF").await.unwrap();
        assert_eq!(fetched.name, "pdf");
        assert_eq!(fetched.registry_id.as_deref(), Some("2"));
        assert!(fetched.warnings.is_empty());
    }

    #[tokio::test]
    async fn ambiguous_slug_takes_first_and_warns() {
        let mut server = Server::new_async().await;
        let _search = mock_search(
            &mut server,
            vec![
                summary("1", "pdf-extra", "PDF Extra"),
                summary("2", "pdf-lite", "PDF Lite"),
            ],
        )
        .await;
        let _download = mock_download(&mut server, "1", "---\nname: pdf-extra\n---\nbody").await;

        let fetched = fetcher(&server).fetch("pdf").await.unwrap();
        assert_eq!(fetched.registry_id.as_deref(), Some("1"));
        assert_eq!(fetched.warnings.len(), 1);
        assert!(fetched.warnings[0].contains("PDF Extra"));
    }

    #[tokio::test]
    async fn single_inexact_result_does_not_warn() {
        let mut server = Server::new_async().await;
        let _search = mock_search(&mut server, vec![summary("7", "pdf-kit", "PDF Kit")]).await;
        let _download = mock_download(&mut server, "7", "---\nname: pdf-kit\n---\nbody").await;

        let fetched = fetcher(&server).fetch("pdf").await.unwrap();
        assert!(fetched.warnings.is_empty());
    }

    #[tokio::test]
    async fn missing_key_fails_before_any_request() {
        let mut server = Server::new_async().await;
        let record = server
            .mock("GET", format!("/api/v1/skills/{ID}").as_str())
            .expect(0)
            .create_async()
            .await;
        let search = server
            .mock("GET", "/api/v1/skills")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let client = RegistryClient::new(&server.url(), None).unwrap();
        let fetcher = RegistryFetcher::new(client);

        let err = fetcher.fetch(ID).await.unwrap_err();
        assert!(matches!(err, Error::AuthRequired(_)));
        let err = fetcher.fetch("pdf").await.unwrap_err();
        assert!(matches!(err, Error::AuthRequired(_)));

        record.assert_async().await;
        search.assert_async().await;
    }

    #[tokio::test]
    async fn no_results_is_not_found() {
        let mut server = Server::new_async().await;
        let _search = mock_search(&mut server, vec![]).await;

        let err = fetcher(&server).fetch("nothing").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
