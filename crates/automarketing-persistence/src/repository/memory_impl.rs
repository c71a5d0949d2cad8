//! In-memory repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::traits::ProductRepository;
use crate::error::Result;
use automarketing_domain::{NewProduct, Product, ProductPatch, ProductStatus};

/// Product repository held in process memory.
///
/// Rows are kept in insertion order; listing returns them newest first.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    rows: RwLock<Vec<Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored products
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list(&self, status: Option<ProductStatus>) -> Result<Vec<Product>> {
        let rows = self.rows.read().await;
        let mut products: Vec<Product> = rows
            .iter()
            .rev()
            .filter(|p| status.is_none_or(|s| p.status == s))
            .cloned()
            .collect();
        // Stable: equal timestamps keep newest-inserted first
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(products)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Product>> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, product: &NewProduct) -> Result<Product> {
        let now = Utc::now();
        let created = Product {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            name: product.name.clone(),
            description: product.description.clone(),
            slug: None,
            product_type: product.product_type,
            category: product.category.clone(),
            price_model: None,
            target_markets: product.target_markets.clone(),
            target_languages: product.target_languages.clone(),
            status: product.status,
            metadata: None,
            total_content_count: None,
            published_content_count: None,
            average_engagement_rate: None,
        };

        self.rows.write().await.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: Uuid, patch: &ProductPatch) -> Result<Option<Product>> {
        let mut rows = self.rows.write().await;
        let Some(product) = rows.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        product.apply(patch);
        product.updated_at = Utc::now();
        Ok(Some(product.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.rows.write().await.retain(|p| p.id != id);
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
