//! The logical "browse" query a paged list is built from.

/// User-controlled filters of a browse screen.
///
/// Two filter sets compare equal exactly when they describe the same
/// logical query; any difference invalidates previously fetched pages.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct BrowseFilters {
    /// Free-text search term. Blank means no search.
    pub search: String,
    pub listing_type: Option<String>,
    pub category: Option<String>,
}

impl BrowseFilters {
    pub fn with_search(mut self, search: &str) -> Self {
        self.search = search.to_string();
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

/// A browse query scoped to one city.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct BrowseQuery {
    pub city_slug: String,
    pub filters: BrowseFilters,
}

impl BrowseQuery {
    pub fn new(city_slug: &str) -> Self {
        Self {
            city_slug: city_slug.to_string(),
            filters: BrowseFilters::default(),
        }
    }

    pub fn with_filters(mut self, filters: BrowseFilters) -> Self {
        self.filters = filters;
        self
    }
}
