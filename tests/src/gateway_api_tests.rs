//! Gateway round trips: the full listing → checkout → access flow over HTTP,
//! plus error-to-status mapping.

use axum::http::StatusCode;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;

use crate::utils::*;

/// Decimals serialize as JSON strings; parse for scale-insensitive compares.
fn decimal(value: &serde_json::Value) -> Decimal {
    value.as_str().unwrap().parse().unwrap()
}

fn paid_project_body() -> serde_json::Value {
    json!({
        "author": seller().to_string(),
        "title": "Actor Framework",
        "description": "Supervision trees for tokio services",
        "category": "libraries",
        "tags": ["rust", "async"],
        "repository": { "paid_url": "https://github.com/acme/actor-framework" },
        "license": {
            "kind": "paid",
            "seller_price": "25.00",
            "currency": "usd",
            "paid_features": ["Full source"]
        }
    })
}

#[tokio::test]
async fn health_reports_ok() {
    let stack = stack();
    let (status, body) = request(&stack.app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["fee_pct"], 20);
}

#[tokio::test]
async fn listing_checkout_access_over_http() {
    let stack = stack();
    stack.processor.set_connect_status(true, true, false);

    // Onboard + refresh.
    let (status, _) = request(
        &stack.app,
        "POST",
        "/sellers/onboard",
        Some(json!({ "seller": seller().to_string() })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, account) = request(
        &stack.app,
        "POST",
        &format!("/sellers/{}/refresh", seller()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(account["charges_enabled"], true);

    // Draft + publish.
    let (status, project) =
        request(&stack.app, "POST", "/projects", Some(paid_project_body())).await;
    assert_eq!(status, StatusCode::OK);
    let project_id = project["id"].as_str().unwrap().to_string();

    let (status, published) = request(
        &stack.app,
        "POST",
        &format!("/projects/{project_id}/publish"),
        Some(json!({ "actor": seller().to_string() })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(published["status"], "published");

    // Pricing view shows the additive breakdown.
    let (status, pricing) = request(
        &stack.app,
        "GET",
        &format!("/projects/{project_id}/pricing"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal(&pricing["marketplace_fee"]), dec!(5.00));
    assert_eq!(decimal(&pricing["customer_total"]), dec!(30));
    assert_eq!(decimal(&pricing["seller_earnings"]), dec!(25.00));

    // Checkout.
    let (status, intent) = request(
        &stack.app,
        "POST",
        "/checkout",
        Some(json!({
            "buyer": buyer().to_string(),
            "project": project_id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let intent_id = intent["intent_id"].as_str().unwrap().to_string();
    assert!(intent["client_secret"].as_str().unwrap().contains("secret"));

    let (status, purchase) = request(
        &stack.app,
        "POST",
        "/checkout/confirm",
        Some(json!({ "intent_id": intent_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(purchase["is_active"], true);
    assert_eq!(decimal(&purchase["price_paid"]), dec!(30));

    // Access flips to the paid URL.
    let (status, access) = request(
        &stack.app,
        "GET",
        &format!("/projects/{project_id}/access?user={}", buyer()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(access["granted"], true);
    assert_eq!(access["url"], "paid");

    // Anonymous stays denied.
    let (status, anon) = request(
        &stack.app,
        "GET",
        &format!("/projects/{project_id}/access"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(anon["granted"], false);
}

#[tokio::test]
async fn checkout_on_draft_maps_to_unprocessable() {
    let stack = stack();
    stack.processor.set_connect_status(true, true, false);

    let (_, project) = request(&stack.app, "POST", "/projects", Some(paid_project_body())).await;
    let project_id = project["id"].as_str().unwrap();

    let (status, body) = request(
        &stack.app,
        "POST",
        "/checkout",
        Some(json!({
            "buyer": buyer().to_string(),
            "project": project_id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn publish_without_payable_account_maps_to_conflict() {
    let stack = stack();
    let (_, project) = request(&stack.app, "POST", "/projects", Some(paid_project_body())).await;
    let project_id = project["id"].as_str().unwrap();

    let (status, _) = request(
        &stack.app,
        "POST",
        &format!("/projects/{project_id}/publish"),
        Some(json!({ "actor": seller().to_string() })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn confirm_unknown_intent_maps_to_not_found() {
    let stack = stack();
    let (status, _) = request(
        &stack.app,
        "POST",
        "/checkout/confirm",
        Some(json!({ "intent_id": "pi_nope" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn wrong_actor_maps_to_forbidden() {
    let stack = stack();
    let (_, project) = request(&stack.app, "POST", "/projects", Some(paid_project_body())).await;
    let project_id = project["id"].as_str().unwrap();

    let (status, _) = request(
        &stack.app,
        "DELETE",
        &format!("/projects/{project_id}"),
        Some(json!({ "actor": buyer().to_string() })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
