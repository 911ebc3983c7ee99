//! Typed client for the marketplace REST API.
//!
//! Every failure surfaces as a classified [`ApiError`]; list endpoints are
//! cursor-paginated and return [`types::Page`].

mod client;
mod errors;
mod query;
pub mod response;
mod result;
pub mod types;
pub use self::client::{Client, DEFAULT_BASE_URL};
pub use self::errors::ApiError;
pub use self::query::{BrowseFilters, BrowseQuery, BusinessQuery, ListingQuery, Query, QueryCommon};
pub use self::result::ApiResult;
