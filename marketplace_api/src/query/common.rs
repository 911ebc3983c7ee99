//! Shared query infrastructure: the [`Query`] trait and [`QueryCommon`] cursor fields.

use url::Url;

/// Trait implemented by all query builders. Provides URL serialization and
/// shared builder methods for cursor pagination.
pub trait Query {
    /// Path segments (relative to the API root) this query is sent to.
    fn path_segments(&self) -> Vec<&str>;

    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url;

    /// Returns a mutable reference to the common query fields.
    fn get_common(&mut self) -> &mut QueryCommon;

    /// Continues from a server-issued cursor. Blank cursors are ignored.
    fn with_cursor(mut self, cursor: Option<&str>) -> Self
    where
        Self: Sized,
    {
        self.get_common().cursor = cursor
            .filter(|c| !c.trim().is_empty())
            .map(str::to_string);
        self
    }

    /// Sets the number of results per page.
    fn with_limit(mut self, limit: u32) -> Self
    where
        Self: Sized,
    {
        self.get_common().limit = Some(limit);
        self
    }
}

/// Fields shared by all list queries: the cursor and the page size.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryCommon {
    /// Opaque cursor from the previous page. `None` requests the first page.
    pub cursor: Option<String>,
    /// Results per page. `None` uses the API default.
    pub limit: Option<u32>,
}

impl QueryCommon {
    /// Appends the cursor and limit parameters to the URL.
    pub fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        if let Some(cursor) = &self.cursor {
            url.query_pairs_mut().append_pair("cursor", cursor);
        }
        if let Some(limit) = self.limit {
            url.query_pairs_mut()
                .append_pair("limit", &limit.to_string());
        }
        url
    }
}

/// Appends `key=value` unless the value is blank.
pub(crate) fn append_non_blank(url: &mut Url, key: &str, value: Option<&str>) {
    if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
        url.query_pairs_mut().append_pair(key, value);
    }
}
