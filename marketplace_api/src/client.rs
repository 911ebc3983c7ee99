//! HTTP client for the marketplace REST API.

use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    query::{BusinessQuery, ListingQuery, Query},
    response::{classify_raw, truncate_body},
    types::{Business, Listing, Page, Response},
    ApiError,
};

/// Default production API root.
pub const DEFAULT_BASE_URL: &str = "https://api.marketplace.local";

/// Per-request timeout applied by the shared `reqwest::Client`.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the marketplace REST API.
///
/// Every failure is returned as a classified [`ApiError`]. A bearer token,
/// when set, is sent with each request.
pub struct Client {
    http: reqwest::Client,
    /// Base URL for the API. Defaults to [`DEFAULT_BASE_URL`].
    base_api_url: String,
    token: Option<String>,
}

impl Client {
    /// Creates a new client pointing at the production API.
    pub fn new() -> Result<Self, ApiError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                ApiError::from(e)
            })?;
        Ok(Self {
            http,
            base_api_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Attaches a bearer token to all subsequent requests.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    fn get_url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.base_api_url).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            ApiError::from(e)
        })?;
        url.path_segments_mut()
            .map_err(|_| ApiError::invalid_url(format!("Cannot be a base URL: {}", self.base_api_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<T>(&self, url: Url) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        tracing::debug!("GET {}", url);
        let mut req = self
            .http
            .get(url)
            .header("accept", "application/json");
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        let resp = req.send().await.map_err(|e| {
            tracing::error!("Failed to get resource: {}", e);
            ApiError::from(e)
        })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            ApiError::from(e)
        })?;

        if !status.is_success() {
            tracing::error!(
                "Request failed with status {}: {}",
                status,
                truncate_body(&body)
            );
        }

        classify_raw(status.as_u16(), &body)
    }

    async fn get_query<T, Q>(&self, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Query,
    {
        let url = self.get_url(&query.path_segments())?;
        self.get(query.add_to_url(&url)).await
    }

    /// Fetches one page of listings in a city.
    pub async fn get_listings(&self, query: &ListingQuery) -> Result<Page<Listing>, ApiError> {
        self.get_query(query).await
    }

    /// Fetches a single listing by id.
    pub async fn get_listing(&self, listing_id: &str) -> Result<Listing, ApiError> {
        let url = self.get_url(&["listings", listing_id])?;
        let resp: Response<Listing> = self.get(url).await?;
        Ok(resp.data)
    }

    /// Fetches one page of businesses in a city.
    pub async fn get_businesses(&self, query: &BusinessQuery) -> Result<Page<Business>, ApiError> {
        self.get_query(query).await
    }

    /// Fetches a single business by id.
    pub async fn get_business(&self, business_id: &str) -> Result<Business, ApiError> {
        let url = self.get_url(&["businesses", business_id])?;
        let resp: Response<Business> = self.get(url).await?;
        Ok(resp.data)
    }
}
