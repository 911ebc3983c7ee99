//! Listing types returned by the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Identified;

/// Server-assigned listing identifier.
pub type ListingID = String;

/// A city-scoped marketplace listing.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: ListingID,

    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Asking price in the listing's currency, if the owner set one.
    #[serde(default)]
    pub price: Option<f64>,

    #[serde(default)]
    pub currency: Option<String>,

    #[serde(default, rename = "type")]
    pub listing_type: Option<String>,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub city_slug: Option<String>,

    #[serde(default)]
    pub business_id: Option<String>,

    #[serde(default)]
    pub owner_id: Option<String>,

    #[serde(default)]
    pub images: Vec<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Identified for Listing {
    type Key = ListingID;

    fn identity(&self) -> ListingID {
        self.id.clone()
    }
}
