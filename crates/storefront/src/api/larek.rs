//! Larek backend endpoints.

use std::sync::Arc;
use std::time::Duration;

use larek_core::{CatalogItem, OrderRequest, OrderResult, ProductList};
use moka::future::Cache;
use tracing::{debug, instrument};

use super::cache::{CacheKey, CacheValue};
use super::{ApiClient, ApiError, ShopApi};
use crate::config::ApiConfig;

/// Client for the Larek backend.
///
/// Catalog responses are cached for 5 minutes; orders are never cached.
#[derive(Clone)]
pub struct LarekApi {
    inner: Arc<LarekApiInner>,
}

struct LarekApiInner {
    client: ApiClient,
    cdn_url: String,
    cache: Cache<CacheKey, CacheValue>,
}

impl LarekApi {
    /// Create a new backend client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Ok(Self {
            inner: Arc::new(LarekApiInner {
                client: ApiClient::new(config.api_url.as_str())?,
                cdn_url: config.cdn_url.as_str().trim_end_matches('/').to_string(),
                cache,
            }),
        })
    }

    /// Point an item's image at the CDN unless it is already absolute.
    fn with_cdn_image(&self, mut item: CatalogItem) -> CatalogItem {
        if !item.image.starts_with("http://") && !item.image.starts_with("https://") {
            let path = item.image.trim_start_matches('/');
            item.image = format!("{}/{path}", self.inner.cdn_url);
        }
        item
    }

    /// Get the full catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_products(&self) -> Result<Vec<CatalogItem>, ApiError> {
        if let Some(CacheValue::Products(items)) = self.inner.cache.get(&CacheKey::Products).await {
            debug!("Cache hit for products");
            return Ok(items);
        }

        let list: ProductList = self.inner.client.get("/product").await?;
        let items: Vec<CatalogItem> = list
            .items
            .into_iter()
            .map(|item| self.with_cdn_image(item))
            .collect();
        debug!(count = items.len(), total = list.total, "fetched catalog");

        self.inner
            .cache
            .insert(CacheKey::Products, CacheValue::Products(items.clone()))
            .await;

        Ok(items)
    }

    /// Submit an order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the order or the request fails.
    #[instrument(skip(self, order), fields(items = order.items.len(), total = %order.total))]
    pub async fn post_order(&self, order: &OrderRequest) -> Result<OrderResult, ApiError> {
        let result: OrderResult = self.inner.client.post("/order", order).await?;
        tracing::info!(order_id = %result.id, total = %result.total, "order placed");
        Ok(result)
    }
}

impl ShopApi for LarekApi {
    async fn product_list(&self) -> Result<Vec<CatalogItem>, ApiError> {
        self.get_products().await
    }

    async fn order_products(&self, order: &OrderRequest) -> Result<OrderResult, ApiError> {
        self.post_order(order).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use larek_core::ProductId;

    fn api() -> LarekApi {
        let config = ApiConfig {
            api_url: "http://localhost:9/api/weblarek".parse().unwrap(),
            cdn_url: "http://localhost:9/content/weblarek/".parse().unwrap(),
        };
        LarekApi::new(&config).unwrap()
    }

    fn item(image: &str) -> CatalogItem {
        CatalogItem {
            id: ProductId::new("a"),
            title: "A".to_string(),
            category: "other".to_string(),
            price: None,
            image: image.to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn test_relative_image_gets_cdn_prefix() {
        let item = api().with_cdn_image(item("/5_Dots.svg"));
        assert_eq!(item.image, "http://localhost:9/content/weblarek/5_Dots.svg");
    }

    #[test]
    fn test_absolute_image_untouched() {
        let item = api().with_cdn_image(item("https://cdn.example.org/x.png"));
        assert_eq!(item.image, "https://cdn.example.org/x.png");
    }
}
