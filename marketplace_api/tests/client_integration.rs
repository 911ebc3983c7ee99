use marketplace_api::{ApiError, BusinessQuery, Client, ListingQuery, Query};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn get_listings_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cities/tbilisi/listings"))
        .and(query_param("search", "bike"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(include_str!("fixtures/listings_page1.json")),
        )
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let page = client
        .get_listings(&ListingQuery::new("tbilisi").with_search("bike"))
        .await
        .unwrap();
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.next_cursor.as_deref(), Some("c1"));
}

#[tokio::test]
async fn get_listings_sends_cursor() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cities/tbilisi/listings"))
        .and(query_param("cursor", "c1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(include_str!("fixtures/listings_page2.json")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let page = client
        .get_listings(&ListingQuery::new("tbilisi").with_cursor(Some("c1")))
        .await
        .unwrap();
    assert_eq!(page.items[1].id, "L3");
    assert!(!page.has_more());
}

#[tokio::test]
async fn bearer_token_is_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/listings/L1"))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(include_str!("fixtures/listing.json")),
        )
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri())
        .unwrap()
        .with_token(Some("secret-token".to_string()));
    let listing = client.get_listing("L1").await.unwrap();
    assert_eq!(listing.title, "City bike, barely used");
}

#[tokio::test]
async fn unauthorized_is_classified() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/listings/L1"))
        .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"message":"token expired"}"#))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let err = client.get_listing("L1").await.unwrap_err();
    assert!(err.is_auth_error());
}

#[tokio::test]
async fn missing_business_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/businesses/B404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let err = client.get_business("B404").await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound { .. }));
}

#[tokio::test]
async fn server_error_keeps_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cities/tbilisi/businesses"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let err = client
        .get_businesses(&BusinessQuery::new("tbilisi"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::ServerError { http_code: 503, .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn rate_limit_is_http_error_with_server_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cities/tbilisi/listings"))
        .respond_with(ResponseTemplate::new(429).set_body_string(r#"{"error":"slow down"}"#))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let err = client
        .get_listings(&ListingQuery::new("tbilisi"))
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "slow down");
    assert!(err.is_retryable());
}

#[tokio::test]
async fn validation_body_is_parsed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cities/tbilisi/listings"))
        .respond_with(
            ResponseTemplate::new(422)
                .set_body_string(r#"{"errors":{"category":["Unknown category"]}}"#),
        )
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let err = client
        .get_listings(&ListingQuery::new("tbilisi").with_category("nope"))
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "Unknown category");
}

#[tokio::test]
async fn empty_success_body_is_invalid_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/listings/L1"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let err = client.get_listing("L1").await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidResponse { .. }));
}

#[tokio::test]
async fn malformed_json_is_decoding_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cities/tbilisi/listings"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not valid json}"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let err = client
        .get_listings(&ListingQuery::new("tbilisi"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::DecodingError { .. }));
}

#[tokio::test]
async fn unreachable_host_is_network_error() {
    // Nothing listens on port 9 (discard) on the loopback interface.
    let client = Client::with_base_url("http://127.0.0.1:9").unwrap();
    let err = client
        .get_listings(&ListingQuery::new("tbilisi"))
        .await
        .unwrap_err();
    assert!(
        matches!(err, ApiError::NetworkError { .. }),
        "unexpected {:?}",
        err
    );
}
