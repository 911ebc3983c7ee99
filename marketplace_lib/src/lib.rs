//! Library layer for the marketplace client: paged browsing, retrying list
//! sources, and session persistence.
//!
//! Wraps the `marketplace_api` crate with the state a browse screen needs
//! (accumulated items, cursor, in-flight flags, last error) and the
//! key-value store the session token lives in, plus validation of
//! user-supplied query values.

pub mod error;
pub mod paging;
pub mod retry;
pub mod session;
pub mod source;
pub mod store;
pub mod validation;

pub use marketplace_api;
pub use marketplace_api::types;
pub use marketplace_api::{
    ApiError, ApiResult, BrowseFilters, BrowseQuery, BusinessQuery, Client, ListingQuery, Query,
    DEFAULT_BASE_URL,
};

pub use error::MarketplaceError;
pub use paging::{merge_unique, ListSource, PagedFetcher, PagedState};
pub use retry::RetryConfig;
pub use session::Session;
pub use source::{ApiSource, BusinessSource, Businesses, Endpoint, ListingSource, Listings};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
