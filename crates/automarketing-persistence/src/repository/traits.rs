//! # Repository Traits
//!
//! Abstract repository interfaces for domain entities.
//! Implementations can be swapped for different backends (Supabase, in-memory, etc.)

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use automarketing_domain::{NewProduct, Product, ProductPatch, ProductStatus};

/// Repository for Product entity operations
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// List products, newest first, optionally filtered by status
    async fn list(&self, status: Option<ProductStatus>) -> Result<Vec<Product>>;

    /// Get product by ID
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Product>>;

    /// Insert a product; the store assigns identity and timestamps
    async fn create(&self, product: &NewProduct) -> Result<Product>;

    /// Apply a partial update, returning the new row or `None` if absent
    async fn update(&self, id: Uuid, patch: &ProductPatch) -> Result<Option<Product>>;

    /// Delete product. Deleting an absent row is not an error.
    async fn delete(&self, id: Uuid) -> Result<()>;

    /// Cheap round trip used by health checks
    async fn ping(&self) -> Result<()>;
}
