//! Supabase repository implementation (PostgREST over HTTPS).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use uuid::Uuid;

use super::traits::ProductRepository;
use crate::error::{PersistenceError, Result};
use automarketing_domain::{NewProduct, Product, ProductPatch, ProductStatus};

const PRODUCTS_TABLE: &str = "products";

// =============================================================================
// SUPABASE CONFIGURATION
// =============================================================================

/// Supabase connection configuration.
///
/// Missing values are reported on first use, not at construction.
#[derive(Debug, Clone, Default)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`
    pub url: Option<String>,
    /// Service-role or anon key
    pub key: Option<String>,
}

// =============================================================================
// REST CLIENT
// =============================================================================

/// Authenticated PostgREST client for one project.
struct RestClient {
    http: Client,
    rest_url: String,
}

impl RestClient {
    fn connect(config: &SupabaseConfig) -> Result<Self> {
        let url = config
            .url
            .as_deref()
            .ok_or(PersistenceError::MissingConfig("SUPABASE_URL"))?;
        let key = config
            .key
            .as_deref()
            .ok_or(PersistenceError::MissingConfig("SUPABASE_SERVICE_ROLE_KEY"))?;

        let mut headers = HeaderMap::new();
        headers.insert("apikey", header_value(key)?);
        headers.insert(AUTHORIZATION, header_value(&format!("Bearer {key}"))?);

        let http = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            http,
            rest_url: format!("{}/rest/v1", url.trim_end_matches('/')),
        })
    }

    fn table(&self, table: &str) -> String {
        format!("{}/{table}", self.rest_url)
    }

    /// Send a request that returns rows
    async fn rows<T: for<'de> Deserialize<'de>>(&self, request: RequestBuilder) -> Result<Vec<T>> {
        let response = ensure_success(request.send().await?).await?;
        Ok(response.json().await?)
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| PersistenceError::Transport(format!("invalid header value: {e}")))
}

/// PostgREST error body
#[derive(Debug, Deserialize)]
struct PostgrestError {
    message: String,
}

/// Turn a non-2xx response into [`PersistenceError::Store`], keeping the
/// store's own message when it sends one.
async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<PostgrestError>(&body)
        .map(|e| e.message)
        .unwrap_or(body);

    Err(PersistenceError::Store {
        status: status.as_u16(),
        message,
    })
}

fn id_filter(id: Uuid) -> String {
    format!("eq.{id}")
}

// =============================================================================
// PRODUCT REPOSITORY
// =============================================================================

/// PATCH body: the caller's fields plus a fresh `updated_at`
#[derive(Serialize)]
struct PatchBody<'a> {
    #[serde(flatten)]
    patch: &'a ProductPatch,
    updated_at: DateTime<Utc>,
}

/// Product repository backed by the Supabase REST API.
pub struct SupabaseProductRepository {
    config: SupabaseConfig,
    client: OnceCell<RestClient>,
}

impl SupabaseProductRepository {
    /// Create a repository without touching the network.
    pub fn new(config: SupabaseConfig) -> Self {
        Self {
            config,
            client: OnceCell::new(),
        }
    }

    async fn client(&self) -> Result<&RestClient> {
        self.client
            .get_or_try_init(|| async { RestClient::connect(&self.config) })
            .await
    }
}

#[async_trait]
impl ProductRepository for SupabaseProductRepository {
    async fn list(&self, status: Option<ProductStatus>) -> Result<Vec<Product>> {
        let client = self.client().await?;

        let mut request = client
            .http
            .get(client.table(PRODUCTS_TABLE))
            .query(&[("select", "*"), ("order", "created_at.desc")]);
        if let Some(status) = status {
            request = request.query(&[("status", format!("eq.{status}"))]);
        }

        let products = client.rows(request).await?;
        tracing::debug!(count = products.len(), ?status, "Listed products");
        Ok(products)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Product>> {
        let client = self.client().await?;

        let request = client
            .http
            .get(client.table(PRODUCTS_TABLE))
            .query(&[("select", "*"), ("limit", "1")])
            .query(&[("id", id_filter(id))]);

        let rows: Vec<Product> = client.rows(request).await?;
        Ok(rows.into_iter().next())
    }

    async fn create(&self, product: &NewProduct) -> Result<Product> {
        let client = self.client().await?;

        let request = client
            .http
            .post(client.table(PRODUCTS_TABLE))
            .header("Prefer", "return=representation")
            .json(product);

        let rows: Vec<Product> = client.rows(request).await?;
        let created = rows
            .into_iter()
            .next()
            .ok_or(PersistenceError::EmptyResponse("insert"))?;

        tracing::info!(product_id = %created.id, name = %created.name, "Product created");
        Ok(created)
    }

    async fn update(&self, id: Uuid, patch: &ProductPatch) -> Result<Option<Product>> {
        let client = self.client().await?;

        let body = PatchBody {
            patch,
            updated_at: Utc::now(),
        };
        let request = client
            .http
            .patch(client.table(PRODUCTS_TABLE))
            .query(&[("id", id_filter(id))])
            .header("Prefer", "return=representation")
            .json(&body);

        let rows: Vec<Product> = client.rows(request).await?;
        Ok(rows.into_iter().next())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let client = self.client().await?;

        let request = client
            .http
            .delete(client.table(PRODUCTS_TABLE))
            .query(&[("id", id_filter(id))]);

        ensure_success(request.send().await?).await?;
        tracing::info!(product_id = %id, "Product deleted");
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        let client = self.client().await?;

        let request = client
            .http
            .head(client.table(PRODUCTS_TABLE))
            .query(&[("select", "id")])
            .header("Prefer", "count=exact");

        ensure_success(request.send().await?).await?;
        Ok(())
    }
}
