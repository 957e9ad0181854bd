//! Integration tests driving the router through full request flows.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use std::str::FromStr;
use tower::ServiceExt;

use store_api::api::create_router;
use store_api::domain::{Product, User};
use store_api::test_utils::test_state;

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_full_user_lifecycle() {
    let router = create_router(test_state());

    // Create
    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/users",
            serde_json::json!({
                "username": "alice",
                "email": "alice@example.com",
                "first_name": "Alice"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: User = serde_json::from_value(body_json(response).await).unwrap();
    assert_eq!(created.username, "alice");

    // Read back
    let response = router
        .clone()
        .oneshot(get_request(&format!("/api/users/{}", created.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched: User = serde_json::from_value(body_json(response).await).unwrap();
    assert_eq!(fetched.id, created.id);

    // List includes the user
    let response = router.clone().oneshot(get_request("/api/users")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let users: Vec<User> = serde_json::from_value(body_json(response).await).unwrap();
    assert!(users.iter().any(|u| u.id == created.id));

    // Partial update leaves other fields untouched
    let response = router
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/users/{}", created.id),
            serde_json::json!({"last_name": "Liddell"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: User = serde_json::from_value(body_json(response).await).unwrap();
    assert_eq!(updated.username, "alice");
    assert_eq!(updated.first_name.as_deref(), Some("Alice"));
    assert_eq!(updated.last_name.as_deref(), Some("Liddell"));

    // Count
    let response = router
        .clone()
        .oneshot(get_request("/api/users/count"))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["count"], 1);

    // Delete, then the id is gone
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/users/{}", created.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/users/{}", created.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = router
        .oneshot(get_request(&format!("/api/users/{}", created.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_username_is_rejected_with_400() {
    let router = create_router(test_state());

    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/users",
            serde_json::json!({"username": "bob", "email": "bob@example.com"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/users",
            serde_json::json!({"username": "bob", "email": "other@example.com"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "username already exists");
}

#[tokio::test]
async fn test_create_user_missing_email_is_400() {
    let router = create_router(test_state());

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/users",
            serde_json::json!({"username": "carol"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "email is required");
}

#[tokio::test]
async fn test_update_missing_user_is_400() {
    let router = create_router(test_state());

    let response = router
        .oneshot(json_request(
            "PUT",
            "/api/users/404",
            serde_json::json!({"first_name": "Nobody"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "user not found with id: 404"
    );
}

#[tokio::test]
async fn test_get_missing_user_is_404_with_message() {
    let router = create_router(test_state());

    let response = router.oneshot(get_request("/api/users/7")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "user not found with id: 7");
}

#[tokio::test]
async fn test_product_crud_and_filters() {
    let router = create_router(test_state());

    for (name, price, quantity, category) in [
        ("Laptop", "999.99", 10, "Electronics"),
        ("Mouse", "19.90", 0, "Electronics"),
        ("Desk", "89.00", 3, "Furniture"),
    ] {
        let response = router
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/products",
                serde_json::json!({
                    "name": name,
                    "price": price,
                    "quantity": quantity,
                    "category": category
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    // Category filter
    let response = router
        .clone()
        .oneshot(get_request("/api/products/category/Electronics"))
        .await
        .unwrap();
    let electronics: Vec<Product> = serde_json::from_value(body_json(response).await).unwrap();
    assert_eq!(electronics.len(), 2);

    // Price filter, ascending
    let response = router
        .clone()
        .oneshot(get_request("/api/products/price/100"))
        .await
        .unwrap();
    let cheap: Vec<Product> = serde_json::from_value(body_json(response).await).unwrap();
    let prices: Vec<Decimal> = cheap.iter().map(|p| p.price).collect();
    assert_eq!(
        prices,
        vec![
            Decimal::from_str("19.90").unwrap(),
            Decimal::from_str("89.00").unwrap()
        ]
    );

    // Stock filter excludes the sold-out mouse
    let response = router
        .clone()
        .oneshot(get_request("/api/products/instock"))
        .await
        .unwrap();
    let in_stock: Vec<Product> = serde_json::from_value(body_json(response).await).unwrap();
    assert_eq!(in_stock.len(), 2);
    assert!(in_stock.iter().all(|p| p.quantity > 0));

    // Count
    let response = router
        .clone()
        .oneshot(get_request("/api/products/count"))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["count"], 3);
}

#[tokio::test]
async fn test_create_product_negative_price_is_400() {
    let router = create_router(test_state());

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/products",
            serde_json::json!({"name": "Laptop", "price": "-1", "quantity": 1}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "price must be zero or positive"
    );
}

#[tokio::test]
async fn test_update_product_partial_patch_over_http() {
    let router = create_router(test_state());

    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/products",
            serde_json::json!({
                "name": "Laptop",
                "price": "999.99",
                "quantity": 10,
                "category": "Electronics"
            }),
        ))
        .await
        .unwrap();
    let created: Product = serde_json::from_value(body_json(response).await).unwrap();

    let response = router
        .oneshot(json_request(
            "PUT",
            &format!("/api/products/{}", created.id),
            serde_json::json!({"quantity": 5}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Product = serde_json::from_value(body_json(response).await).unwrap();
    assert_eq!(updated.quantity, 5);
    assert_eq!(updated.name, "Laptop");
    assert_eq!(updated.price, Decimal::from_str("999.99").unwrap());
    assert_eq!(updated.category.as_deref(), Some("Electronics"));
}

#[tokio::test]
async fn test_health_endpoint_body() {
    let router = create_router(test_state());

    let response = router
        .oneshot(get_request("/actuator/health"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "UP");
    assert!(body["timestamp"].as_i64().unwrap() > 0);
}
