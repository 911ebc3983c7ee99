//! Cursor-paginated browsing with de-duplicated accumulation.
//!
//! A [`PagedFetcher`] owns the state of one logical browse query (a city
//! plus [`BrowseFilters`]). It fetches the first page on refresh, appends
//! further pages on demand, and drops responses that arrive after a newer
//! refresh has superseded them.

use std::collections::HashSet;
use std::future::Future;
use std::sync::Mutex;

use marketplace_api::types::{Identified, Page};
use marketplace_api::{ApiError, BrowseFilters, BrowseQuery};
use tokio::sync::watch;

/// Something that can serve pages of a browse query.
pub trait ListSource {
    type Item: Identified + Clone;

    /// Fetches the page after `cursor`, or the first page when `cursor` is `None`.
    fn fetch_page(
        &self,
        query: &BrowseQuery,
        cursor: Option<&str>,
    ) -> impl Future<Output = Result<Page<Self::Item>, ApiError>> + Send;
}

/// Observable state of a paged list.
#[derive(Debug, Clone, PartialEq)]
pub struct PagedState<T> {
    /// Accumulated items in server order, unique by identity.
    pub items: Vec<T>,
    /// Cursor for the next page. `None` once the last page was seen.
    pub cursor: Option<String>,
    /// A first-page fetch is in flight.
    pub is_loading: bool,
    /// A next-page fetch is in flight.
    pub is_loading_more: bool,
    pub has_more: bool,
    /// The most recent failure, cleared by the next success.
    pub error: Option<ApiError>,
    pub filters: BrowseFilters,
}

impl<T> Default for PagedState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            cursor: None,
            is_loading: false,
            is_loading_more: false,
            has_more: false,
            error: None,
            filters: BrowseFilters::default(),
        }
    }
}

impl<T> PagedState<T> {
    /// Neither kind of fetch is in flight.
    pub fn is_idle(&self) -> bool {
        !self.is_loading && !self.is_loading_more
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Refresh,
    NextPage,
}

/// Marks a fetch in flight for one generation. Dropping it before
/// [`InFlight::finish`] (the caller abandoned the future) clears the
/// matching loading flag so later fetches are not blocked.
struct InFlight<'a, S: ListSource> {
    fetcher: &'a PagedFetcher<S>,
    generation: u64,
    operation: Operation,
    armed: bool,
}

impl<S: ListSource> InFlight<'_, S> {
    fn finish(mut self) {
        self.armed = false;
    }
}

impl<S: ListSource> Drop for InFlight<'_, S> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut inner = self.fetcher.lock();
        if inner.generation != self.generation {
            return;
        }
        match self.operation {
            Operation::Refresh => inner.state.is_loading = false,
            Operation::NextPage => inner.state.is_loading_more = false,
        }
        tracing::debug!(
            "{:?} for {} abandoned before completion",
            self.operation,
            self.fetcher.city_slug
        );
        self.fetcher.publish(&inner.state);
    }
}

struct Inner<T> {
    state: PagedState<T>,
    /// Bumped by every refresh; responses tagged with an older value are dropped.
    generation: u64,
    last_failed: Option<Operation>,
}

/// Drives a paginated browse query against a [`ListSource`].
///
/// All mutation happens under one mutex that is never held across an
/// await, so the fetcher may be shared by reference between concurrently
/// polled futures. Observers can poll [`PagedFetcher::state`] or
/// [`PagedFetcher::subscribe`] to snapshots published after each transition.
pub struct PagedFetcher<S: ListSource> {
    source: S,
    city_slug: String,
    inner: Mutex<Inner<S::Item>>,
    updates: watch::Sender<PagedState<S::Item>>,
}

impl<S: ListSource> PagedFetcher<S> {
    pub fn new(source: S, city_slug: &str) -> Self {
        let (updates, _) = watch::channel(PagedState::default());
        Self {
            source,
            city_slug: city_slug.to_string(),
            inner: Mutex::new(Inner {
                state: PagedState::default(),
                generation: 0,
                last_failed: None,
            }),
            updates,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> PagedState<S::Item> {
        self.lock().state.clone()
    }

    /// Receiver that observes every published state transition.
    pub fn subscribe(&self) -> watch::Receiver<PagedState<S::Item>> {
        self.updates.subscribe()
    }

    /// The browse query the next request would be sent with.
    pub fn query(&self) -> BrowseQuery {
        let filters = self.lock().state.filters.clone();
        self.query_for(filters)
    }

    /// Reloads the first page, replacing everything accumulated so far.
    ///
    /// Ignored while another refresh is already in flight. An in-flight
    /// next-page fetch is pre-empted and its response will be discarded.
    /// The first page is de-duplicated by identity like every later page.
    pub async fn refresh(&self) {
        let (generation, query) = {
            let mut inner = self.lock();
            if inner.state.is_loading {
                tracing::debug!("refresh already in flight for {}", self.city_slug);
                return;
            }
            self.start_refresh(&mut inner)
        };
        self.finish_refresh(generation, query).await;
    }

    /// Fetches the page after the current cursor and appends its new items.
    ///
    /// No-op while any fetch is in flight or when there are no more pages.
    pub async fn load_next_page(&self) {
        let (generation, query, cursor) = {
            let mut inner = self.lock();
            if inner.state.is_loading || inner.state.is_loading_more || !inner.state.has_more {
                return;
            }
            let Some(cursor) = inner
                .state
                .cursor
                .clone()
                .filter(|c| !c.trim().is_empty())
            else {
                inner.state.has_more = false;
                self.publish(&inner.state);
                return;
            };
            inner.state.is_loading_more = true;
            self.publish(&inner.state);
            let query = self.query_for(inner.state.filters.clone());
            (inner.generation, query, cursor)
        };

        let in_flight = self.in_flight(generation, Operation::NextPage);
        tracing::debug!("loading page after cursor {} for {}", cursor, self.city_slug);
        let result = self.source.fetch_page(&query, Some(&cursor)).await;
        in_flight.finish();

        let mut inner = self.lock();
        if inner.generation != generation {
            tracing::warn!(
                "discarding stale page for {} (generation {} superseded by {})",
                self.city_slug,
                generation,
                inner.generation
            );
            return;
        }
        inner.state.is_loading_more = false;
        match result {
            Ok(page) => {
                let has_more = page.has_more();
                merge_unique(&mut inner.state.items, page.items);
                inner.state.cursor = page.next_cursor.filter(|_| has_more);
                inner.state.has_more = has_more;
                inner.state.error = None;
                inner.last_failed = None;
            }
            Err(err) => {
                tracing::warn!("next page failed for {}: {}", self.city_slug, err);
                inner.state.error = Some(err);
                inner.last_failed = Some(Operation::NextPage);
            }
        }
        self.publish(&inner.state);
    }

    /// Replaces the filters and refreshes if they changed.
    ///
    /// A filter change supersedes any fetch in flight, including a refresh.
    pub async fn set_filters(&self, filters: BrowseFilters) {
        let (generation, query) = {
            let mut inner = self.lock();
            if inner.state.filters == filters {
                return;
            }
            inner.state.filters = filters;
            self.start_refresh(&mut inner)
        };
        self.finish_refresh(generation, query).await;
    }

    pub async fn set_search_term(&self, search: &str) {
        let filters = self.state().filters.with_search(search);
        self.set_filters_or_refresh(filters).await;
    }

    pub async fn set_type_filter(&self, listing_type: Option<&str>) {
        let mut filters = self.state().filters;
        filters.listing_type = listing_type.map(str::to_string);
        self.set_filters_or_refresh(filters).await;
    }

    pub async fn set_category_filter(&self, category: Option<&str>) {
        let mut filters = self.state().filters;
        filters.category = category.map(str::to_string);
        self.set_filters_or_refresh(filters).await;
    }

    /// Re-runs whichever operation failed last. No-op if nothing failed.
    pub async fn retry(&self) {
        let last_failed = self.lock().last_failed;
        match last_failed {
            Some(Operation::Refresh) => self.refresh().await,
            Some(Operation::NextPage) => self.load_next_page().await,
            None => {}
        }
    }

    /// Clears the current error without touching anything else.
    pub fn clear_error(&self) {
        let mut inner = self.lock();
        if inner.state.error.take().is_some() {
            self.publish(&inner.state);
        }
    }

    async fn set_filters_or_refresh(&self, filters: BrowseFilters) {
        let unchanged = self.lock().state.filters == filters;
        if unchanged {
            self.refresh().await;
        } else {
            self.set_filters(filters).await;
        }
    }

    fn start_refresh(&self, inner: &mut Inner<S::Item>) -> (u64, BrowseQuery) {
        inner.generation += 1;
        inner.state.items.clear();
        inner.state.cursor = None;
        inner.state.has_more = false;
        inner.state.is_loading = true;
        inner.state.is_loading_more = false;
        self.publish(&inner.state);
        tracing::debug!(
            "refreshing {} (generation {})",
            self.city_slug,
            inner.generation
        );
        (inner.generation, self.query_for(inner.state.filters.clone()))
    }

    async fn finish_refresh(&self, generation: u64, query: BrowseQuery) {
        let in_flight = self.in_flight(generation, Operation::Refresh);
        let result = self.source.fetch_page(&query, None).await;
        in_flight.finish();

        let mut inner = self.lock();
        if inner.generation != generation {
            tracing::warn!(
                "discarding stale first page for {} (generation {} superseded by {})",
                self.city_slug,
                generation,
                inner.generation
            );
            return;
        }
        inner.state.is_loading = false;
        match result {
            Ok(page) => {
                let has_more = page.has_more();
                let mut items = Vec::with_capacity(page.items.len());
                merge_unique(&mut items, page.items);
                inner.state.items = items;
                inner.state.cursor = page.next_cursor.filter(|_| has_more);
                inner.state.has_more = has_more;
                inner.state.error = None;
                inner.last_failed = None;
            }
            Err(err) => {
                tracing::warn!("refresh failed for {}: {}", self.city_slug, err);
                inner.state.error = Some(err);
                inner.last_failed = Some(Operation::Refresh);
            }
        }
        self.publish(&inner.state);
    }

    fn in_flight(&self, generation: u64, operation: Operation) -> InFlight<'_, S> {
        InFlight {
            fetcher: self,
            generation,
            operation,
            armed: true,
        }
    }

    fn query_for(&self, filters: BrowseFilters) -> BrowseQuery {
        BrowseQuery::new(&self.city_slug).with_filters(filters)
    }

    fn publish(&self, state: &PagedState<S::Item>) {
        self.updates.send_replace(state.clone());
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner<S::Item>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Appends `incoming` to `existing`, skipping items whose identity is
/// already present. Existing items keep their positions.
pub fn merge_unique<T: Identified>(existing: &mut Vec<T>, incoming: Vec<T>) {
    let mut seen: HashSet<T::Key> = existing.iter().map(Identified::identity).collect();
    for item in incoming {
        if seen.insert(item.identity()) {
            existing.push(item);
        }
    }
}
