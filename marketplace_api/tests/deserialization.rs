use marketplace_api::types::{Business, Identified, Listing, Page, Response};

#[test]
fn deserialize_listing_page_with_items_key() {
    let page: Page<Listing> =
        serde_json::from_str(include_str!("fixtures/listings_page1.json")).unwrap();
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.next_cursor.as_deref(), Some("c1"));
    assert!(page.has_more());

    let bike = &page.items[0];
    assert_eq!(bike.id, "L1");
    assert_eq!(bike.price, Some(120.0));
    assert_eq!(bike.currency.as_deref(), Some("GEL"));
    assert_eq!(bike.listing_type.as_deref(), Some("sale"));
    assert_eq!(bike.owner_id.as_deref(), Some("U7"));
    assert_eq!(bike.images.len(), 1);
    assert!(bike.created_at.is_some());

    let flat = &page.items[1];
    assert_eq!(flat.business_id.as_deref(), Some("B3"));
    assert!(flat.images.is_empty());
    assert_eq!(flat.created_at, None);
}

#[test]
fn deserialize_listing_page_with_data_key_and_null_cursor() {
    let page: Page<Listing> =
        serde_json::from_str(include_str!("fixtures/listings_page2.json")).unwrap();
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.next_cursor, None);
    assert!(!page.has_more());
}

#[test]
fn blank_cursor_means_last_page() {
    let page: Page<Business> =
        serde_json::from_str(include_str!("fixtures/businesses.json")).unwrap();
    assert_eq!(page.next_cursor.as_deref(), Some(""));
    assert!(!page.has_more());
    assert!(page.items[0].verified);
    assert!(!page.items[1].verified);
    assert_eq!(page.items[1].identity(), "B4");
}

#[test]
fn missing_cursor_field_defaults_to_none() {
    let page: Page<Business> = serde_json::from_str(r#"{"items": []}"#).unwrap();
    assert!(page.items.is_empty());
    assert!(!page.has_more());
}

#[test]
fn deserialize_single_listing_response() {
    let resp: Response<Listing> =
        serde_json::from_str(include_str!("fixtures/listing.json")).unwrap();
    assert_eq!(resp.data.identity(), "L1");
    assert_eq!(resp.data.city_slug.as_deref(), Some("tbilisi"));
}
