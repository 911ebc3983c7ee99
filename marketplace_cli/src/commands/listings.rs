use anyhow::Result;
use clap::Args;
use marketplace_lib::validation;
use marketplace_lib::{BrowseFilters, FileStore, ListingSource, PagedFetcher, Session};

use super::{collect_pages, report};
use crate::output::{print_json, print_listings_table, OutputFormat};

#[derive(Args)]
pub struct ListingsArgs {
    /// City slug (e.g. tbilisi, new-york)
    #[arg(long)]
    pub city: String,

    /// Free-text search
    #[arg(long)]
    pub search: Option<String>,

    /// Filter by listing type (e.g. sale, rent, service)
    #[arg(long = "type")]
    pub listing_type: Option<String>,

    /// Filter by category
    #[arg(long)]
    pub category: Option<String>,

    /// Number of pages to fetch
    #[arg(long, default_value = "1")]
    pub pages: u32,

    /// Results per page
    #[arg(long, default_value = "20")]
    pub limit: u32,
}

#[derive(Args)]
pub struct ListingArgs {
    /// Listing id
    pub id: String,
}

pub async fn run(
    args: &ListingsArgs,
    session: &Session<FileStore>,
    base_url: &str,
    format: &OutputFormat,
) -> Result<()> {
    let city = validation::validate_city_slug(&args.city)?;
    let pages = validation::validate_pages(args.pages)?;
    let limit = validation::validate_limit(args.limit)?;

    let mut filters = BrowseFilters::default();
    if let Some(ref search) = args.search {
        filters = filters.with_search(&validation::validate_search(search)?);
    }
    if let Some(ref listing_type) = args.listing_type {
        filters = filters.with_type(&validation::validate_filter(listing_type)?);
    }
    if let Some(ref category) = args.category {
        filters = filters.with_category(&validation::validate_filter(category)?);
    }

    let client = session.client(base_url)?;
    let fetcher = PagedFetcher::new(ListingSource::new(client).with_limit(limit), &city);
    let state = collect_pages(&fetcher, filters, pages)
        .await
        .map_err(|e| report(session, e))?;

    eprintln!(
        "{} listings in {}{}",
        state.items.len(),
        city,
        if state.has_more { " (more available)" } else { "" }
    );

    match format {
        OutputFormat::Table => print_listings_table(&state.items),
        OutputFormat::Json => print_json(&state.items),
    }

    Ok(())
}

pub async fn run_one(
    args: &ListingArgs,
    session: &Session<FileStore>,
    base_url: &str,
    format: &OutputFormat,
) -> Result<()> {
    let id = validation::validate_id(&args.id)?;
    let client = session.client(base_url)?;
    let listing = client
        .get_listing(&id)
        .await
        .map_err(|e| report(session, e))?;

    match format {
        OutputFormat::Table => print_listings_table(std::slice::from_ref(&listing)),
        OutputFormat::Json => print_json(&listing),
    }

    Ok(())
}
