//! Product endpoints driven through the real router.

mod common;

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use serde_json::json;
use uuid::Uuid;

use automarketing_domain::{CreateProductRequest, ProductType};
use automarketing_persistence::ProductRepository;
use automarketing_persistence::cache::keys;

use common::{DownBackend, DownRepository, TestApp, send, send_raw};

#[tokio::test]
async fn test_create_then_get_returns_same_product() {
    let app = TestApp::new();

    let created = app.create("Acme Analytics", "B2B").await;
    assert_eq!(created["name"], "Acme Analytics");
    assert_eq!(created["type"], "B2B");
    assert_eq!(created["status"], "active");
    assert_eq!(created["target_languages"], json!(["en-US"]));
    assert_eq!(created["target_markets"], json!([]));

    let id = created["id"].as_str().unwrap();
    let (status, body) = app.send(Method::GET, &format!("/api/products/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Acme Analytics");
    assert_eq!(body["data"]["type"], "B2B");
}

#[tokio::test]
async fn test_get_missing_product_is_404() {
    let app = TestApp::new();

    let (status, body) = app
        .send(Method::GET, &format!("/api/products/{}", Uuid::new_v4()), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Product not found");
    assert_eq!(body["code"], "NOT_FOUND");

    let (status, _) = app.send(Method::GET, "/api/products/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_without_required_fields_is_rejected() {
    let app = TestApp::new();

    let (status, body) = app
        .send(Method::POST, "/api/products", Some(json!({ "type": "B2C" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields: name, type");

    let (status, _) = app
        .send(Method::POST, "/api/products", Some(json!({ "name": "No type" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .send(Method::POST, "/api/products", Some(json!({ "name": "   ", "type": "B2C" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(app.repo.is_empty().await);
}

#[tokio::test]
async fn test_create_with_malformed_json_is_400() {
    let app = TestApp::new();

    let (status, body) = send_raw(
        &app.router,
        Method::POST,
        "/api/products",
        "application/json",
        "{\"name\": ",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");

    let (status, _) = app
        .send(
            Method::POST,
            "/api/products",
            Some(json!({ "name": "Bad type", "type": "B2G" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(app.repo.is_empty().await);
}

#[tokio::test]
async fn test_patch_is_visible_on_next_read() {
    let app = TestApp::new();
    let created = app.create("Old name", "B2C").await;
    let id = created["id"].as_str().unwrap();
    let uri = format!("/api/products/{id}");

    // Warm the item cache
    let (status, _) = app.send(Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let cached: Option<serde_json::Value> = app.cache.get(&keys::product(id)).await;
    assert!(cached.is_some());

    let (status, body) = app
        .send(
            Method::PATCH,
            &uri,
            Some(json!({ "name": "New name", "status": "paused" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "New name");
    assert_eq!(body["data"]["type"], "B2C");

    let (_, body) = app.send(Method::GET, &uri, None).await;
    assert_eq!(body["data"]["name"], "New name");
    assert_eq!(body["data"]["status"], "paused");
}

#[tokio::test]
async fn test_patch_null_clears_optional_fields() {
    let app = TestApp::new();
    let (status, body) = app
        .send(
            Method::POST,
            "/api/products",
            Some(json!({
                "name": "Described",
                "type": "B2B",
                "description": "Launch copy",
                "category": "Analytics"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let uri = format!("/api/products/{}", body["data"]["id"].as_str().unwrap());

    // Warm the item cache so the clear has to invalidate it
    let (_, body) = app.send(Method::GET, &uri, None).await;
    assert_eq!(body["data"]["description"], "Launch copy");

    let (status, body) = app
        .send(Method::PATCH, &uri, Some(json!({ "description": null })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].get("description").is_none());
    assert_eq!(body["data"]["category"], "Analytics");

    let (status, body) = app
        .send(
            Method::PATCH,
            &uri,
            Some(json!({ "category": null, "name": "Renamed" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].get("category").is_none());
    assert_eq!(body["data"]["name"], "Renamed");

    let (_, body) = app.send(Method::GET, &uri, None).await;
    assert!(body["data"].get("description").is_none());
    assert!(body["data"].get("category").is_none());
    assert_eq!(body["data"]["name"], "Renamed");
}

#[tokio::test]
async fn test_patch_invalidates_cached_lists() {
    let app = TestApp::new();
    let created = app.create("Listed", "B2B2C").await;
    let id = created["id"].as_str().unwrap();

    let (_, body) = app.send(Method::GET, "/api/products?status=paused", None).await;
    assert_eq!(body["data"], json!([]));
    let (_, body) = app.send(Method::GET, "/api/products", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    app.send(
        Method::PATCH,
        &format!("/api/products/{id}"),
        Some(json!({ "status": "paused" })),
    )
    .await;

    let (_, body) = app.send(Method::GET, "/api/products?status=paused", None).await;
    assert_eq!(body["data"][0]["id"], id);
    let (_, body) = app.send(Method::GET, "/api/products?status=active", None).await;
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_patch_rejects_empty_or_missing() {
    let app = TestApp::new();
    let created = app.create("Patched", "B2C").await;
    let uri = format!("/api/products/{}", created["id"].as_str().unwrap());

    let (status, _) = app.send(Method::PATCH, &uri, Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.send(Method::PATCH, &uri, Some(json!({ "name": "" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .send(
            Method::PATCH,
            &format!("/api/products/{}", Uuid::new_v4()),
            Some(json!({ "name": "Ghost" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_then_get_is_404() {
    let app = TestApp::new();
    let created = app.create("Short lived", "B2B").await;
    let uri = format!("/api/products/{}", created["id"].as_str().unwrap());

    // Cache both the item and the list before deleting
    app.send(Method::GET, &uri, None).await;
    app.send(Method::GET, "/api/products", None).await;

    let (status, body) = app.send(Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (status, _) = app.send(Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = app.send(Method::GET, "/api/products", None).await;
    assert_eq!(body["data"], json!([]));

    // Deleting an id with no row is a no-op
    let (status, body) = app.send(Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));
}

#[tokio::test]
async fn test_malformed_id_is_404_on_every_route() {
    let app = TestApp::new();
    app.create("Untouched", "B2C").await;
    let uri = "/api/products/not-a-uuid";

    for (method, payload) in [
        (Method::GET, None),
        (Method::PATCH, Some(json!({ "name": "Ghost" }))),
        (Method::DELETE, None),
    ] {
        let (status, body) = app.send(method.clone(), uri, payload).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{method}");
        assert_eq!(body["error"], "Product not found", "{method}");
        assert_eq!(body["code"], "NOT_FOUND", "{method}");
    }

    // The malformed id never reaches the store
    let router = TestApp::with_repository(
        Arc::new(DownRepository),
        Arc::new(automarketing_persistence::MemoryCacheBackend::new()),
    );
    let (status, _) = send(&router, Method::DELETE, uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    assert_eq!(app.repo.len().await, 1);
}

#[tokio::test]
async fn test_list_is_served_from_cache_until_a_write() {
    let app = TestApp::new();
    app.create("First", "B2B").await;

    let (_, body) = app.send(Method::GET, "/api/products", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    // A write that bypasses the API leaves the cached list untouched
    let direct = CreateProductRequest {
        name: Some("Direct".to_string()),
        product_type: Some(ProductType::B2c),
        ..Default::default()
    }
    .validate()
    .unwrap();
    app.repo.create(&direct).await.unwrap();

    let (_, body) = app.send(Method::GET, "/api/products", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    // Any API write invalidates every cached list
    app.create("Third", "B2C").await;
    let (_, body) = app.send(Method::GET, "/api/products", None).await;
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Third", "Direct", "First"]);
}

#[tokio::test]
async fn test_unknown_status_filter_is_400() {
    let app = TestApp::new();

    let (status, body) = app.send(Method::GET, "/api/products?status=deleted", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");

    let (status, _) = app.send(Method::GET, "/api/products?status=", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_crud_works_with_cache_down() {
    let app = TestApp::with_backend(Arc::new(DownBackend));

    let created = app.create("Resilient", "B2C").await;
    let uri = format!("/api/products/{}", created["id"].as_str().unwrap());

    let (status, body) = app.send(Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Resilient");

    let (status, body) = app.send(Method::GET, "/api/products", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, _) = app
        .send(Method::PATCH, &uri, Some(json!({ "category": "tools" })))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app.send(Method::GET, &uri, None).await;
    assert_eq!(body["data"]["category"], "tools");

    let (status, _) = app.send(Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app.send(Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_store_failure_is_500_with_store_message() {
    let router = TestApp::with_repository(
        Arc::new(DownRepository),
        Arc::new(automarketing_persistence::MemoryCacheBackend::new()),
    );

    let (status, body) = send(&router, Method::GET, "/api/products", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "upstream unavailable");
    assert_eq!(body["code"], "PERSISTENCE_ERROR");

    let (status, _) = send(
        &router,
        Method::GET,
        &format!("/api/products/{}", Uuid::new_v4()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, _) = send(
        &router,
        Method::DELETE,
        &format!("/api/products/{}", Uuid::new_v4()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
