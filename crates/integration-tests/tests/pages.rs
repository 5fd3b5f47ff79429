//! Page rendering, promo codes and form submissions.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use lavs_boutique_integration_tests::TestClient;

#[tokio::test]
async fn test_health() {
    let mut client = TestClient::new();
    let response = client.get("/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "ok");
}

#[tokio::test]
async fn test_request_id_header() {
    let mut client = TestClient::new();
    let response = client.get("/health").await;
    assert!(response.headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn test_home_lists_catalog() {
    let mut client = TestClient::new();
    let page = client.get("/").await;

    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Silk Scarf"));
    assert!(page.body.contains("$45.00"));
    assert!(page.body.contains("Leather Crossbody"));
}

#[tokio::test]
async fn test_home_category_filter() {
    let mut client = TestClient::new();
    let page = client.get("/?category=Bags").await;

    assert!(page.body.contains("Canvas Tote"));
    assert!(page.body.contains("Leather Crossbody"));
    assert!(!page.body.contains("Silk Scarf"));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let mut client = TestClient::new();
    let response = client.get("/nowhere").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_valid_promo_code() {
    let mut client = TestClient::new();
    let response = client.post_form("/cart/promo", "code=+save20+").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("promo-message success"));
    assert!(response.body.contains("20% discount applied!"));
}

#[tokio::test]
async fn test_invalid_promo_code() {
    let mut client = TestClient::new();
    let response = client.post_form("/cart/promo", "code=BOGUS").await;

    assert!(response.body.contains("promo-message error"));
    assert!(response.body.contains("Invalid promo code"));
}

#[tokio::test]
async fn test_promo_does_not_change_totals() {
    let mut client = TestClient::new();
    client.post_form("/cart/add", "product_id=1").await;
    client.post_form("/cart/promo", "code=WELCOME10").await;

    let page = client.get("/cart").await;
    assert!(page.body.contains(r#"<dd id="total">$58.60</dd>"#));
}

#[tokio::test]
async fn test_contact_submission() {
    let mut client = TestClient::new();
    let response = client
        .post_form(
            "/contact",
            "first_name=Ava&last_name=Lee&email=ava%40example.com&subject=Sizing&message=Hello+there",
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("form-message success"));
    assert!(response.body.contains("Thank you for your message!"));
}

#[tokio::test]
async fn test_contact_acknowledges_unparseable_email() {
    let mut client = TestClient::new();
    let response = client
        .post_form(
            "/contact",
            "first_name=Ava&last_name=Lee&email=nope&subject=Sizing&message=Hello",
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("form-message success"));
    assert!(response.body.contains("Thank you for your message!"));
}

#[tokio::test]
async fn test_contact_acknowledges_blank_message() {
    let mut client = TestClient::new();
    let response = client
        .post_form(
            "/contact",
            "first_name=Ava&last_name=Lee&email=ava%40example.com&subject=Sizing&message=+++",
        )
        .await;

    assert!(response.body.contains("form-message success"));
    assert!(response.body.contains("Thank you for your message!"));
}

#[tokio::test]
async fn test_newsletter_subscribe_echoes_address_as_typed() {
    let mut client = TestClient::new();
    let response = client
        .post_form("/newsletter", "email=Ava%40Example.com")
        .await;

    let toast = response.toast().unwrap();
    assert_eq!(toast["kind"], "success");
    assert_eq!(toast["message"], "Successfully subscribed with Ava@Example.com!");
}

#[tokio::test]
async fn test_newsletter_acknowledges_unparseable_email() {
    let mut client = TestClient::new();
    let response = client.post_form("/newsletter", "email=not-an-email").await;

    assert_eq!(response.status, StatusCode::OK);
    let toast = response.toast().unwrap();
    assert_eq!(toast["kind"], "success");
    assert_eq!(toast["message"], "Successfully subscribed with not-an-email!");
}

#[tokio::test]
async fn test_newsletter_non_ascii_address() {
    let mut client = TestClient::new();
    let response = client
        .post_form("/newsletter", "email=zo%C3%AB%40example.com")
        .await;

    let toast = response.toast().unwrap();
    assert_eq!(toast["message"], "Successfully subscribed with zoë@example.com!");
}

#[tokio::test]
async fn test_search_prompt_toast() {
    let mut client = TestClient::new();
    let response = client
        .post_with_header("/search", "HX-Prompt", "linen dress")
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.is_empty());
    let toast = response.toast().unwrap();
    assert_eq!(toast["kind"], "success");
    assert_eq!(toast["message"], "Searching for \"linen dress\"...");
}

#[tokio::test]
async fn test_search_empty_answer_is_silent() {
    let mut client = TestClient::new();

    let empty = client.post_with_header("/search", "HX-Prompt", "").await;
    assert_eq!(empty.status, StatusCode::OK);
    assert!(empty.triggers().is_none());

    let missing = client.post_form("/search", "").await;
    assert!(missing.triggers().is_none());
}

#[tokio::test]
async fn test_clear_filters() {
    let mut client = TestClient::new();

    let filtered = client.get("/?category=Bags").await;
    assert!(!filtered.body.contains("Silk Scarf"));
    assert!(filtered.triggers().is_none());

    let cleared = client.get("/?category=Bags&clear=true").await;
    assert_eq!(cleared.status, StatusCode::OK);
    assert!(cleared.body.contains("Silk Scarf"));
    assert!(cleared.body.contains("Canvas Tote"));
    assert_eq!(cleared.toast().unwrap()["message"], "Filters cleared");
}
