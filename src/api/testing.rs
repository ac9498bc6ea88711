//! In-memory catalog client for tests

use crate::api::error::{ApiError, ApiResult};
use crate::api::payload::{CreateProductRequest, UpdateProductRequest};
use crate::api::CatalogClient;
use crate::catalog::{Category, Product, ProductId};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Record of a call made to the mock client
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    Fetch,
    Update(ProductId, UpdateProductRequest),
    Create(CreateProductRequest),
}

#[derive(Debug, Default)]
struct MockState {
    products: Vec<Product>,
    failure: Option<ApiError>,
    /// When set, created products come back without category or images
    sparse_create_responses: bool,
    next_id: ProductId,
    calls: Vec<MockCall>,
}

/// Mock catalog API holding products in memory
#[derive(Debug, Clone, Default)]
pub struct MockCatalogClient {
    state: Arc<RwLock<MockState>>,
}

impl MockCatalogClient {
    pub fn new(products: Vec<Product>) -> Self {
        let next_id = products.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        Self {
            state: Arc::new(RwLock::new(MockState {
                products,
                next_id,
                ..MockState::default()
            })),
        }
    }

    /// Make every following call fail with `error`
    pub async fn fail_with(&self, error: ApiError) {
        self.state.write().await.failure = Some(error);
    }

    pub async fn recover(&self) {
        self.state.write().await.failure = None;
    }

    pub async fn set_sparse_create_responses(&self, sparse: bool) {
        self.state.write().await.sparse_create_responses = sparse;
    }

    pub async fn set_products(&self, products: Vec<Product>) {
        self.state.write().await.products = products;
    }

    pub async fn calls(&self) -> Vec<MockCall> {
        self.state.read().await.calls.clone()
    }
}

#[async_trait]
impl CatalogClient for MockCatalogClient {
    async fn fetch_products(&self) -> ApiResult<Vec<Product>> {
        let mut state = self.state.write().await;
        state.calls.push(MockCall::Fetch);
        if let Some(error) = state.failure.clone() {
            return Err(error);
        }
        Ok(state.products.clone())
    }

    async fn update_product(
        &self,
        id: ProductId,
        request: &UpdateProductRequest,
    ) -> ApiResult<Product> {
        let mut state = self.state.write().await;
        state.calls.push(MockCall::Update(id, request.clone()));
        if let Some(error) = state.failure.clone() {
            return Err(error);
        }

        let product = state
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(ApiError::status(404))?;
        product.title = request.title.clone();
        product.price = request.price;
        product.description = Some(request.description.clone());
        Ok(product.clone())
    }

    async fn create_product(&self, request: &CreateProductRequest) -> ApiResult<Product> {
        let mut state = self.state.write().await;
        state.calls.push(MockCall::Create(request.clone()));
        if let Some(error) = state.failure.clone() {
            return Err(error);
        }

        let id = state.next_id;
        state.next_id += 1;

        let mut product = Product::new(id, request.title.clone(), request.price)
            .with_description(request.description.clone());
        if !state.sparse_create_responses {
            product.category = Some(Category::new(request.category_id, "Server category"));
            product.images = request.images.clone();
        }
        state.products.insert(0, product.clone());
        Ok(product)
    }
}
