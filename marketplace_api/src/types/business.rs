//! Business types returned by the API.

use serde::{Deserialize, Serialize};

use super::Identified;

pub type BusinessID = String;

/// A business registered in a city.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    pub id: BusinessID,

    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub city_slug: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,

    /// Whether an admin has verified the business.
    #[serde(default)]
    pub verified: bool,
}

impl Identified for Business {
    type Key = BusinessID;

    fn identity(&self) -> BusinessID {
        self.id.clone()
    }
}
