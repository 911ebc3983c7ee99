use url::Url;

use super::{
    common::{append_non_blank, QueryCommon},
    BrowseQuery, Query,
};

/// Query for `GET /cities/{citySlug}/businesses`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BusinessQuery {
    pub common: QueryCommon,
    pub city_slug: String,
    pub search: Option<String>,
    pub category: Option<String>,
}

impl Query for BusinessQuery {
    fn path_segments(&self) -> Vec<&str> {
        vec!["cities", self.city_slug.as_str(), "businesses"]
    }

    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }

    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        append_non_blank(&mut url, "search", self.search.as_deref());
        append_non_blank(&mut url, "category", self.category.as_deref());
        self.common.add_to_url(&url)
    }
}

impl BusinessQuery {
    pub fn new(city_slug: &str) -> Self {
        Self {
            city_slug: city_slug.to_string(),
            ..Default::default()
        }
    }

    pub fn with_search(mut self, search: &str) -> Self {
        self.search = Some(search.to_string());
        self
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }
}

/// Businesses have no type; the browse query's type filter is ignored.
impl From<&BrowseQuery> for BusinessQuery {
    fn from(browse: &BrowseQuery) -> Self {
        Self {
            common: QueryCommon::default(),
            city_slug: browse.city_slug.clone(),
            search: Some(browse.filters.search.clone()),
            category: browse.filters.category.clone(),
        }
    }
}
