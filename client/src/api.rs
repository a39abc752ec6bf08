use std::time::Duration;

use quizboard_common::wire::{CategoryResponse, CategorySummary};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::{GameError, Result};

/// Timeout applied to every request; in-flight fetches never hang setup.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// The two read-only endpoints the game needs from a trivia source.
///
/// `TriviaApi` implements this against the real HTTP API; tests substitute
/// an in-memory source.
pub trait TriviaSource {
    /// Fetch the single category listed at the given offset.
    fn category_at_offset(
        &self,
        offset: u64,
    ) -> impl Future<Output = Result<CategorySummary>> + Send;

    /// Fetch a category's title and full clue list by id.
    fn category_by_id(&self, id: u64) -> impl Future<Output = Result<CategoryResponse>> + Send;
}

/// HTTP client for a jservice-style trivia API.
pub struct TriviaApi {
    client: Client,
    base_url: Url,
}

impl TriviaApi {
    /// Create a new client for the API at the specified base URL.
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        let client = Client::builder().timeout(DEFAULT_TIMEOUT).build()?;

        Ok(Self { client, base_url })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(GameError::Status {
                status: response.status(),
            });
        }

        Ok(response.json().await?)
    }
}

impl TriviaSource for TriviaApi {
    async fn category_at_offset(&self, offset: u64) -> Result<CategorySummary> {
        let url = self
            .base_url
            .join(&format!("api/categories?count=1&offset={offset}"))?;

        let mut listing: Vec<CategorySummary> = self.get_json(url).await?;
        listing.pop().ok_or_else(|| GameError::MalformedResponse {
            reason: format!("empty category listing at offset {offset}"),
        })
    }

    async fn category_by_id(&self, id: u64) -> Result<CategoryResponse> {
        let url = self.base_url.join(&format!("api/category?id={id}"))?;
        self.get_json(url).await
    }
}
