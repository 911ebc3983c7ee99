use url::Url;

use super::{
    common::{append_non_blank, QueryCommon},
    BrowseQuery, Query,
};

/// Query for `GET /cities/{citySlug}/listings`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListingQuery {
    pub common: QueryCommon,
    pub city_slug: String,
    pub search: Option<String>,
    pub listing_type: Option<String>,
    pub category: Option<String>,
}

impl Query for ListingQuery {
    fn path_segments(&self) -> Vec<&str> {
        vec!["cities", self.city_slug.as_str(), "listings"]
    }

    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }

    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        append_non_blank(&mut url, "search", self.search.as_deref());
        append_non_blank(&mut url, "type", self.listing_type.as_deref());
        append_non_blank(&mut url, "category", self.category.as_deref());
        self.common.add_to_url(&url)
    }
}

impl ListingQuery {
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

    pub fn with_type(mut self, listing_type: &str) -> Self {
        self.listing_type = Some(listing_type.to_string());
        self
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }
}

impl From<&BrowseQuery> for ListingQuery {
    fn from(browse: &BrowseQuery) -> Self {
        Self {
            common: QueryCommon::default(),
            city_slug: browse.city_slug.clone(),
            search: Some(browse.filters.search.clone()),
            listing_type: browse.filters.listing_type.clone(),
            category: browse.filters.category.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/cities/tbilisi/listings").unwrap()
    }

    #[test]
    fn first_page_has_no_cursor() {
        let url = ListingQuery::new("tbilisi").add_to_url(&base());
        assert_eq!(url.query(), None);
    }

    #[test]
    fn blank_filters_are_skipped() {
        let url = ListingQuery::new("tbilisi")
            .with_search("  ")
            .with_type("")
            .with_category("cars")
            .add_to_url(&base());
        assert_eq!(url.query(), Some("category=cars"));
    }

    #[test]
    fn cursor_and_limit_follow_filters() {
        let url = ListingQuery::new("tbilisi")
            .with_search("bike")
            .with_type("sale")
            .with_cursor(Some("c1"))
            .with_limit(20)
            .add_to_url(&base());
        assert_eq!(url.query(), Some("search=bike&type=sale&cursor=c1&limit=20"));
    }

    #[test]
    fn blank_cursor_requests_first_page() {
        let query = ListingQuery::new("tbilisi").with_cursor(Some(" "));
        assert_eq!(query.common.cursor, None);
    }

    #[test]
    fn built_from_browse_query() {
        let browse = BrowseQuery::new("batumi").with_filters(
            crate::query::BrowseFilters::default()
                .with_search("sofa")
                .with_category("furniture"),
        );
        let query = ListingQuery::from(&browse);
        assert_eq!(query.city_slug, "batumi");
        assert_eq!(query.search.as_deref(), Some("sofa"));
        assert_eq!(query.category.as_deref(), Some("furniture"));
        assert_eq!(query.listing_type, None);
        assert_eq!(query.path_segments(), vec!["cities", "batumi", "listings"]);
    }
}
