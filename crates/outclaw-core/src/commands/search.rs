//! Registry search command.

use crate::context::AppContext;
use crate::error::{Error, Result};
use crate::registry::{RegistryClient, SearchOptions, SearchPage};

#[derive(Debug, Clone)]
pub struct SearchCommand {
    client: RegistryClient,
}

impl SearchCommand {
    pub fn new(client: RegistryClient) -> Self {
        Self { client }
    }

    pub fn from_context(ctx: &AppContext) -> Result<Self> {
        Ok(Self::new(ctx.registry_client()?))
    }

    pub async fn execute(&self, term: &str, options: &SearchOptions) -> Result<SearchPage> {
        let term = term.trim();
        if term.is_empty() {
            return Err(Error::Validation("search term is empty".to_string()));
        }
        self.client.search(term, options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn blank_term_is_rejected_without_request() {
        let client = RegistryClient::new("https://registry.invalid", None).unwrap();
        let err = SearchCommand::new(client)
            .execute("   ", &SearchOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
