use super::*;

fn load_listings_fixture() -> Vec<Listing> {
    let json_str = include_str!("../../marketplace_api/tests/fixtures/listings_page1.json");
    let resp: serde_json::Value = serde_json::from_str(json_str).unwrap();
    serde_json::from_value(resp["items"].clone()).unwrap()
}

fn load_businesses_fixture() -> Vec<Business> {
    let json_str = include_str!("../../marketplace_api/tests/fixtures/businesses.json");
    let resp: serde_json::Value = serde_json::from_str(json_str).unwrap();
    serde_json::from_value(resp["items"].clone()).unwrap()
}

// -- format_price tests --

#[test]
fn test_format_price_with_currency() {
    assert_eq!(format_price(Some(120.0), Some("GEL")), "120.00 GEL");
}

#[test]
fn test_format_price_without_currency() {
    assert_eq!(format_price(Some(9.5), None), "9.50");
}

#[test]
fn test_format_price_missing() {
    assert_eq!(format_price(None, Some("USD")), "-");
}

// -- truncate tests --

#[test]
fn test_truncate_short_unchanged() {
    assert_eq!(truncate("Guitar lessons", 48), "Guitar lessons");
}

#[test]
fn test_truncate_long_is_cut_on_chars() {
    let long = "ბ".repeat(60);
    let cut = truncate(&long, 10);
    assert_eq!(cut.chars().count(), 10);
    assert!(cut.ends_with("..."));
}

// -- row builder tests --

#[test]
fn test_listing_rows() {
    let rows = build_listing_rows(&load_listings_fixture());
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].id, "L1");
    assert_eq!(rows[0].price, "120.00 GEL");
    assert_eq!(rows[0].posted, "2024-05-01");
    assert_eq!(rows[1].price, "-");
    assert_eq!(rows[1].posted, "");
    assert_eq!(rows[1].listing_type, "rent");
}

#[test]
fn test_business_rows() {
    let rows = build_business_rows(&load_businesses_fixture());
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].verified, "yes");
    assert_eq!(rows[1].verified, "no");
    assert_eq!(rows[1].category, "");
}

#[test]
fn test_listing_table_has_headers() {
    let table = Table::new(build_listing_rows(&load_listings_fixture())).to_string();
    assert!(table.contains("Title"));
    assert!(table.contains("City bike, barely used"));
}

#[test]
fn test_output_format_parse() {
    assert_eq!(OutputFormat::parse("json"), OutputFormat::Json);
    assert_eq!(OutputFormat::parse("table"), OutputFormat::Table);
    assert_eq!(OutputFormat::parse("anything"), OutputFormat::Table);
}
