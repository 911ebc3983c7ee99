mod page;
pub use self::page::{Identified, Page, Response};

mod listing;
pub use self::listing::{Listing, ListingID};

mod business;
pub use self::business::{Business, BusinessID};
