//! CLI subcommand implementations.

pub mod businesses;
pub mod listings;
pub mod session;

use anyhow::anyhow;
use marketplace_lib::{
    ApiError, BrowseFilters, FileStore, ListSource, PagedFetcher, PagedState, Session,
};

/// Loads the first page for `filters`, then follows cursors for up to
/// `pages` pages in total.
///
/// A failure on a later page keeps what was already fetched; only a
/// failure with nothing to show is returned as an error.
pub async fn collect_pages<S: ListSource>(
    fetcher: &PagedFetcher<S>,
    filters: BrowseFilters,
    pages: u32,
) -> Result<PagedState<S::Item>, ApiError> {
    if fetcher.state().filters == filters {
        fetcher.refresh().await;
    } else {
        fetcher.set_filters(filters).await;
    }
    for _ in 1..pages {
        let state = fetcher.state();
        if !state.has_more || state.error.is_some() {
            break;
        }
        fetcher.load_next_page().await;
    }

    let state = fetcher.state();
    match &state.error {
        Some(err) if state.items.is_empty() => Err(err.clone()),
        Some(err) => {
            eprintln!("Warning: stopped early: {}", err.user_message());
            Ok(state)
        }
        None => Ok(state),
    }
}

/// Turns a classified API error into the message shown to the user,
/// dropping the stored token if the server rejected it.
pub fn report(session: &Session<FileStore>, err: ApiError) -> anyhow::Error {
    tracing::debug!("request failed: {:?}", err);
    match session.handle_error(&err) {
        Ok(true) => anyhow!("{} (stored token removed)", err.user_message()),
        Ok(false) => anyhow!(err.user_message()),
        Err(store_err) => anyhow!("{} ({})", err.user_message(), store_err),
    }
}
