//! [`ListSource`] implementations backed by the REST client.

use std::future::Future;
use std::marker::PhantomData;

use marketplace_api::types::{Business, Identified, Listing, Page};
use marketplace_api::{ApiError, BrowseQuery, BusinessQuery, Client, ListingQuery, Query};

use crate::paging::ListSource;
use crate::retry::{with_retry, RetryConfig};

/// A cursor-paginated collection of the REST API.
pub trait Endpoint {
    type Item: Identified + Clone + Send;
    type Query: Query + for<'q> From<&'q BrowseQuery> + Send + Sync;

    /// Name used in retry logs.
    const LABEL: &'static str;

    fn fetch(
        client: &Client,
        query: &Self::Query,
    ) -> impl Future<Output = Result<Page<Self::Item>, ApiError>> + Send;
}

/// `GET /cities/{citySlug}/listings`
pub struct Listings;

impl Endpoint for Listings {
    type Item = Listing;
    type Query = ListingQuery;
    const LABEL: &'static str = "listings";

    async fn fetch(client: &Client, query: &ListingQuery) -> Result<Page<Listing>, ApiError> {
        client.get_listings(query).await
    }
}

/// `GET /cities/{citySlug}/businesses`
pub struct Businesses;

impl Endpoint for Businesses {
    type Item = Business;
    type Query = BusinessQuery;
    const LABEL: &'static str = "businesses";

    async fn fetch(client: &Client, query: &BusinessQuery) -> Result<Page<Business>, ApiError> {
        client.get_businesses(query).await
    }
}

/// Serves pages of one [`Endpoint`], retrying retryable failures.
pub struct ApiSource<E: Endpoint> {
    client: Client,
    retry: RetryConfig,
    limit: Option<u32>,
    endpoint: PhantomData<fn() -> E>,
}

pub type ListingSource = ApiSource<Listings>;
pub type BusinessSource = ApiSource<Businesses>;

impl<E: Endpoint> ApiSource<E> {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            retry: RetryConfig::from_env(),
            limit: None,
            endpoint: PhantomData,
        }
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    fn request(&self, query: &BrowseQuery, cursor: Option<&str>) -> E::Query {
        let request = E::Query::from(query).with_cursor(cursor);
        match self.limit {
            Some(limit) => request.with_limit(limit),
            None => request,
        }
    }
}

impl<E: Endpoint> ListSource for ApiSource<E> {
    type Item = E::Item;

    async fn fetch_page(
        &self,
        query: &BrowseQuery,
        cursor: Option<&str>,
    ) -> Result<Page<E::Item>, ApiError> {
        let request = self.request(query, cursor);
        with_retry(&self.retry, E::LABEL, || E::fetch(&self.client, &request)).await
    }
}
