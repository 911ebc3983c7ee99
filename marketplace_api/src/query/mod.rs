mod common;
pub use self::common::{Query, QueryCommon};

mod browse;
pub use self::browse::{BrowseFilters, BrowseQuery};

mod listing;
pub use self::listing::ListingQuery;

mod business;
pub use self::business::BusinessQuery;
