use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use dokan::api::{self, AppState};
use dokan::config::Config;
use dokan::lifecycle::MarketSystem;
use serde_json::{json, Value};
use tower::ServiceExt;

/// HTTP-level tests: requests go through the real router, extractors and actors.

fn test_config() -> Config {
    Config::from_lookup(|key| match key {
        "JWT_SECRET" => Some("integration-test-secret".to_string()),
        _ => None,
    })
    .unwrap()
}

fn setup() -> (MarketSystem, Router) {
    let config = test_config();
    let system = MarketSystem::new(32);
    let app = api::router(AppState::new(&system, &config));
    (system, app)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    send_with(app, method, uri, token, body, &[]).await
}

async fn send_with(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
    headers: &[(&str, &str)],
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn register_and_login(app: &Router, email: &str, role: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({"email": email, "password": "secret123", "role": role})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["message"], "User registered successfully");

    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"email": email, "password": "secret123"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["token"].as_str().unwrap().to_string()
}

async fn teardown(system: MarketSystem, app: Router) {
    drop(app);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_health_and_unknown_routes() {
    let (system, app) = setup();

    let (status, body) = send(&app, Method::GET, "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Server is running");

    let (status, body) = send(&app, Method::GET, "/api/nowhere", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Cannot GET /api/nowhere");

    teardown(system, app).await;
}

#[tokio::test]
async fn test_register_and_login_errors() {
    let (system, app) = setup();
    register_and_login(&app, "Owner@Example.com", "shopkeeper").await;

    let duplicate = json!({"email": "owner@example.com", "password": "secret123", "role": "customer"});
    let (status, _) = send(&app, Method::POST, "/api/auth/register", None, Some(duplicate)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let invalid = json!({"email": "not-an-email", "password": "123", "role": "customer"});
    let (status, body) = send(&app, Method::POST, "/api/auth/register", None, Some(invalid)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");

    let bad_role = json!({"email": "x@example.com", "password": "secret123", "role": "admin"});
    let (status, _) = send(&app, Method::POST, "/api/auth/register", None, Some(bad_role)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    for credentials in [
        json!({"email": "owner@example.com", "password": "wrong-pass"}),
        json!({"email": "nobody@example.com", "password": "secret123"}),
    ] {
        let (status, body) = send(&app, Method::POST, "/api/auth/login", None, Some(credentials)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid credentials");
    }

    teardown(system, app).await;
}

#[tokio::test]
async fn test_protected_routes_require_matching_role() {
    let (system, app) = setup();
    let customer = register_and_login(&app, "alice@example.com", "customer").await;
    let shop = json!({"name": "Corner", "type": "grocery", "location": {"latitude": 23.81, "longitude": 90.41}});

    let (status, body) = send(&app, Method::POST, "/api/shops", None, Some(shop.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "No token, authorization denied");

    let (status, _) = send(&app, Method::POST, "/api/shops", Some("garbage"), Some(shop.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, Method::POST, "/api/shops", Some(&customer), Some(shop)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    teardown(system, app).await;
}

#[tokio::test]
async fn test_shop_catalog_and_nearby_flow() {
    let (system, app) = setup();
    let owner = register_and_login(&app, "owner@example.com", "shopkeeper").await;

    let shop = json!({
        "name": "Corner",
        "type": "grocery",
        "location": {"type": "Point", "coordinates": [90.4125, 23.8103]}
    });
    let (status, shop) = send(&app, Method::POST, "/api/shops", Some(&owner), Some(shop)).await;
    assert_eq!(status, StatusCode::CREATED, "{shop}");
    let shop_id = shop["_id"].as_str().unwrap().to_string();
    assert_eq!(shop["location"]["latitude"], 23.8103);

    let (status, found) = send(&app, Method::GET, "/api/shops/nearby?lat=23.8110&lng=90.4130&radius=2000", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found.as_array().unwrap().len(), 1);
    assert_eq!(found[0]["_id"], shop_id.as_str());
    assert!(found[0]["distance"].as_f64().unwrap() < 120.0);

    let (status, body) = send(&app, Method::GET, "/api/shops/nearby?lng=90.4130", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Missing lat coordinate");

    let product = json!({"name": "Rice", "price": 50, "stock": 10, "shopId": shop_id});
    let (status, product) = send(&app, Method::POST, "/api/products", Some(&owner), Some(product)).await;
    assert_eq!(status, StatusCode::CREATED, "{product}");
    let product_uri = format!("/api/products/{}", product["_id"].as_str().unwrap());

    let (status, _) = send(&app, Method::PATCH, &product_uri, Some(&owner), Some(json!({"shopId": "shop_99"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, patched) = send(&app, Method::PATCH, &product_uri, Some(&owner), Some(json!({"price": 55}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["price"], 55.0);

    let (status, catalog) = send(&app, Method::GET, &format!("/api/products?shop={shop_id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(catalog.as_array().unwrap().len(), 1);

    let (status, _) = send(&app, Method::GET, "/api/shops/not-an-id", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, Method::DELETE, &format!("/api/shops/{shop_id}"), Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());

    let (status, catalog) = send(&app, Method::GET, &format!("/api/products/shop/{shop_id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(catalog.as_array().unwrap().is_empty());

    teardown(system, app).await;
}

#[tokio::test]
async fn test_order_placement_over_http() {
    let (system, app) = setup();
    let owner = register_and_login(&app, "owner@example.com", "shopkeeper").await;
    let customer = register_and_login(&app, "alice@example.com", "customer").await;

    let shop = json!({"name": "Corner", "type": "grocery", "location": {"latitude": 23.81, "longitude": 90.41}});
    let (_, shop) = send(&app, Method::POST, "/api/shops", Some(&owner), Some(shop)).await;
    let shop_id = shop["_id"].as_str().unwrap().to_string();
    let product = json!({"name": "Rice", "price": 50, "stock": 10, "shopId": shop_id});
    let (_, product) = send(&app, Method::POST, "/api/products", Some(&owner), Some(product)).await;
    let product_id = product["_id"].as_str().unwrap().to_string();

    let order = json!({"shopId": shop_id, "products": [{"productId": product_id, "quantity": 3}], "totalPrice": 1});
    let key = [("Idempotency-Key", "checkout-1")];
    let (status, placed) = send_with(&app, Method::POST, "/api/orders", Some(&customer), Some(order.clone()), &key).await;
    assert_eq!(status, StatusCode::CREATED, "{placed}");
    assert_eq!(placed["totalPrice"], 150.0);
    assert_eq!(placed["status"], "pending");

    let (status, replay) = send_with(&app, Method::POST, "/api/orders", Some(&customer), Some(order.clone()), &key).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(replay["_id"], placed["_id"]);

    let (status, _) = send(&app, Method::POST, "/api/orders", Some(&owner), Some(order)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let too_many = json!({"shop": shop_id, "product": product_id, "quantity": 8});
    let (status, body) = send(&app, Method::POST, "/api/orders", Some(&customer), Some(too_many)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");

    let (status, history) = send(&app, Method::GET, "/api/orders/customer", Some(&customer), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(history.as_array().unwrap().len(), 1);
    assert_eq!(history[0]["products"][0]["product"]["name"], "Rice");

    let status_uri = format!("/api/orders/{}/status", placed["_id"].as_str().unwrap());
    let (status, updated) = send(&app, Method::PUT, &status_uri, Some(&owner), Some(json!({"status": "shipped"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "shipped");

    let (status, _) = send(&app, Method::PUT, &status_uri, Some(&owner), Some(json!({"status": "pending"}))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, incoming) = send(&app, Method::GET, &format!("/api/orders/shop/{shop_id}"), Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(incoming.as_array().unwrap().len(), 1);

    teardown(system, app).await;
}
