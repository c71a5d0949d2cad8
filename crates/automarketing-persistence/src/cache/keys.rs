//! Cache key namespace.

use std::fmt::Display;

use automarketing_domain::ProductStatus;

/// Glob covering every cached product list
pub const PRODUCT_LIST_PATTERN: &str = "products:list:*";

/// Key for a single product
pub fn product(id: impl Display) -> String {
    format!("product:{id}")
}

/// Key for a product list, optionally filtered by status
pub fn product_list(status: Option<ProductStatus>) -> String {
    match status {
        Some(status) => format!("products:list:{status}"),
        None => "products:list:all".to_string(),
    }
}
