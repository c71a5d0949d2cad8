//! Shared helpers for router-level tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use automarketing_api::{ApiContextBuilder, build_router};
use automarketing_domain::{NewProduct, Product, ProductPatch, ProductStatus};
use automarketing_persistence::{
    CacheBackend, CacheError, CacheManager, InMemoryProductRepository, MemoryCacheBackend,
    PersistenceError, ProductRepository,
};

/// Router wired to in-memory backends, plus handles to inspect them
pub struct TestApp {
    pub router: Router,
    pub repo: Arc<InMemoryProductRepository>,
    pub cache: CacheManager,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_backend(Arc::new(MemoryCacheBackend::new()))
    }

    pub fn with_backend(backend: Arc<dyn CacheBackend>) -> Self {
        let repo = Arc::new(InMemoryProductRepository::new());
        let cache = CacheManager::from_shared(backend);

        let ctx = ApiContextBuilder::new()
            .with_products(repo.clone())
            .with_cache(cache.clone())
            .build()
            .unwrap();

        Self {
            router: build_router(ctx, &[]),
            repo,
            cache,
        }
    }

    pub fn with_repository(products: Arc<dyn ProductRepository>, backend: Arc<dyn CacheBackend>) -> Router {
        let ctx = ApiContextBuilder::new()
            .with_products(products)
            .with_cache(CacheManager::from_shared(backend))
            .build()
            .unwrap();
        build_router(ctx, &[])
    }

    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        send(&self.router, method, uri, body).await
    }

    /// POST a product and return its JSON representation
    pub async fn create(&self, name: &str, product_type: &str) -> Value {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/products",
                Some(serde_json::json!({ "name": name, "type": product_type })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {body}");
        body["data"].clone()
    }
}

pub async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

pub async fn send_raw(router: &Router, method: Method, uri: &str, content_type: &str, body: &'static str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

/// Cache backend whose every call fails, as with Redis down
pub struct DownBackend;

#[async_trait]
impl CacheBackend for DownBackend {
    async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        Err(CacheError::Unavailable("connection refused".to_string()))
    }

    async fn set(&self, _key: &str, _value: String, _ttl: Option<Duration>) -> Result<(), CacheError> {
        Err(CacheError::Unavailable("connection refused".to_string()))
    }

    async fn delete(&self, _key: &str) -> Result<u64, CacheError> {
        Err(CacheError::Unavailable("connection refused".to_string()))
    }

    async fn delete_many(&self, _keys: &[String]) -> Result<u64, CacheError> {
        Err(CacheError::Unavailable("connection refused".to_string()))
    }

    async fn keys(&self, _pattern: &str) -> Result<Vec<String>, CacheError> {
        Err(CacheError::Unavailable("connection refused".to_string()))
    }

    async fn clear(&self) -> Result<(), CacheError> {
        Err(CacheError::Unavailable("connection refused".to_string()))
    }

    async fn size(&self) -> Result<usize, CacheError> {
        Err(CacheError::Unavailable("connection refused".to_string()))
    }

    async fn ping(&self) -> Result<(), CacheError> {
        Err(CacheError::Unavailable("connection refused".to_string()))
    }
}

/// Store whose every call fails, as with Supabase unreachable
pub struct DownRepository;

fn store_down() -> PersistenceError {
    PersistenceError::Store {
        status: 503,
        message: "upstream unavailable".to_string(),
    }
}

#[async_trait]
impl ProductRepository for DownRepository {
    async fn list(&self, _status: Option<ProductStatus>) -> Result<Vec<Product>, PersistenceError> {
        Err(store_down())
    }

    async fn get_by_id(&self, _id: Uuid) -> Result<Option<Product>, PersistenceError> {
        Err(store_down())
    }

    async fn create(&self, _product: &NewProduct) -> Result<Product, PersistenceError> {
        Err(store_down())
    }

    async fn update(&self, _id: Uuid, _patch: &ProductPatch) -> Result<Option<Product>, PersistenceError> {
        Err(store_down())
    }

    async fn delete(&self, _id: Uuid) -> Result<(), PersistenceError> {
        Err(store_down())
    }

    async fn ping(&self) -> Result<(), PersistenceError> {
        Err(store_down())
    }
}
