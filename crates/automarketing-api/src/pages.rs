//! Dashboard pages.
//!
//! Static HTML; the inline scripts talk to the JSON API.

use axum::Router;
use axum::response::Html;
use axum::routing::get;

use crate::context::ApiContext;

const HOME_PAGE: &str = include_str!("../assets/index.html");
const PRODUCTS_PAGE: &str = include_str!("../assets/products.html");
const NEW_PRODUCT_PAGE: &str = include_str!("../assets/new_product.html");

pub async fn home() -> Html<&'static str> {
    Html(HOME_PAGE)
}

pub async fn products() -> Html<&'static str> {
    Html(PRODUCTS_PAGE)
}

pub async fn new_product() -> Html<&'static str> {
    Html(NEW_PRODUCT_PAGE)
}

pub fn page_router() -> Router<ApiContext> {
    Router::new()
        .route("/", get(home))
        .route("/dashboard/products", get(products))
        .route("/dashboard/products/new", get(new_product))
}
