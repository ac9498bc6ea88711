//! HTTP implementation of the catalog client

use crate::api::error::{ApiError, ApiResult};
use crate::api::payload::{CreateProductRequest, ProductPayload, UpdateProductRequest};
use crate::api::CatalogClient;
use crate::catalog::{Product, ProductId};
use async_trait::async_trait;
use reqwest::Response;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// Default API the admin panel talks to
pub const DEFAULT_API_BASE_URL: &str = "https://api.escuelajs.co/api/v1";

/// Catalog client backed by `reqwest`
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpCatalogClient {
    /// Create a client for `base_url`. Without a timeout the reqwest default applies.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> ApiResult<Self> {
        let mut builder = reqwest::Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ApiError::network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: normalize_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/products`
    pub fn products_url(&self) -> ApiResult<Url> {
        Ok(self.base_url.join("products")?)
    }

    /// `{base}/products/{id}`
    pub fn product_url(&self, id: ProductId) -> ApiResult<Url> {
        Ok(self.base_url.join(&format!("products/{}", id))?)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::status(status.as_u16()));
        }
        Ok(response.json::<T>().await?)
    }
}

/// Make sure the base path ends with `/` so joins append instead of replacing
fn normalize_base_url(base_url: &str) -> ApiResult<Url> {
    let trimmed = base_url.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    };
    let url = Url::parse(&with_slash)?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ApiError::invalid_url(format!(
            "unsupported scheme '{}'",
            url.scheme()
        )));
    }
    Ok(url)
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn fetch_products(&self) -> ApiResult<Vec<Product>> {
        let url = self.products_url()?;
        tracing::debug!("GET {}", url);

        let response = self.http.get(url).send().await?;
        let payload: Vec<ProductPayload> = Self::decode(response).await?;

        tracing::debug!("Fetched {} products", payload.len());
        Ok(payload.into_iter().map(Product::from).collect())
    }

    async fn update_product(
        &self,
        id: ProductId,
        request: &UpdateProductRequest,
    ) -> ApiResult<Product> {
        let url = self.product_url(id)?;
        tracing::debug!("PUT {}", url);

        let response = self.http.put(url).json(request).send().await?;
        let payload: ProductPayload = Self::decode(response).await?;
        Ok(payload.into())
    }

    async fn create_product(&self, request: &CreateProductRequest) -> ApiResult<Product> {
        let url = self.products_url()?;
        tracing::debug!("POST {}", url);

        let response = self.http.post(url).json(request).send().await?;
        let payload: ProductPayload = Self::decode(response).await?;
        Ok(payload.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_urls() {
        let client = HttpCatalogClient::new(DEFAULT_API_BASE_URL, None).unwrap();
        assert_eq!(
            client.products_url().unwrap().as_str(),
            "https://api.escuelajs.co/api/v1/products"
        );
        assert_eq!(
            client.product_url(42).unwrap().as_str(),
            "https://api.escuelajs.co/api/v1/products/42"
        );
    }

    #[test]
    fn test_trailing_slash_is_accepted() {
        let client = HttpCatalogClient::new("http://localhost:3000/api/", None).unwrap();
        assert_eq!(
            client.products_url().unwrap().as_str(),
            "http://localhost:3000/api/products"
        );
    }

    #[test]
    fn test_rejects_bad_urls() {
        assert!(matches!(
            HttpCatalogClient::new("not a url", None),
            Err(ApiError::InvalidUrl { .. })
        ));
        assert!(matches!(
            HttpCatalogClient::new("ftp://example.com", None),
            Err(ApiError::InvalidUrl { .. })
        ));
    }
}
