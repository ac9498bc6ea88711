//! Client side of the product catalog REST API

pub mod client;
pub mod error;
pub mod payload;
pub mod testing;

pub use client::{HttpCatalogClient, DEFAULT_API_BASE_URL};
pub use error::{ApiError, ApiResult};
pub use payload::{CreateProductRequest, ProductPayload, UpdateProductRequest};

use crate::catalog::{Product, ProductId};
use async_trait::async_trait;

/// Operations the admin panel needs from the catalog API
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// `GET /products`
    async fn fetch_products(&self) -> ApiResult<Vec<Product>>;

    /// `PUT /products/{id}`
    async fn update_product(
        &self,
        id: ProductId,
        request: &UpdateProductRequest,
    ) -> ApiResult<Product>;

    /// `POST /products`
    async fn create_product(&self, request: &CreateProductRequest) -> ApiResult<Product>;
}
