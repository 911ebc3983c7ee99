use marketplace_lib::types::{Business, Listing};
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Self {
        match s {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Table,
        }
    }
}

#[derive(Tabled)]
struct ListingRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Type")]
    listing_type: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Posted")]
    posted: String,
}

#[derive(Tabled)]
struct BusinessRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Verified")]
    verified: String,
}

// -- Row builders --

fn build_listing_rows(listings: &[Listing]) -> Vec<ListingRow> {
    listings
        .iter()
        .map(|l| ListingRow {
            id: l.id.clone(),
            title: truncate(&l.title, 48),
            listing_type: l.listing_type.clone().unwrap_or_default(),
            category: l.category.clone().unwrap_or_default(),
            price: format_price(l.price, l.currency.as_deref()),
            posted: l
                .created_at
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        })
        .collect()
}

fn build_business_rows(businesses: &[Business]) -> Vec<BusinessRow> {
    businesses
        .iter()
        .map(|b| BusinessRow {
            id: b.id.clone(),
            name: truncate(&b.name, 48),
            category: b.category.clone().unwrap_or_default(),
            phone: b.phone.clone().unwrap_or_default(),
            verified: if b.verified { "yes" } else { "no" }.to_string(),
        })
        .collect()
}

// -- Table output --

pub fn print_listings_table(listings: &[Listing]) {
    let mut table = Table::new(build_listing_rows(listings));
    table.with(Style::rounded());
    println!("{}", table);
}

pub fn print_businesses_table(businesses: &[Business]) {
    let mut table = Table::new(build_business_rows(businesses));
    table.with(Style::rounded());
    println!("{}", table);
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

fn format_price(price: Option<f64>, currency: Option<&str>) -> String {
    match (price, currency) {
        (Some(p), Some(c)) => format!("{:.2} {}", p, c),
        (Some(p), None) => format!("{:.2}", p),
        (None, _) => "-".to_string(),
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
