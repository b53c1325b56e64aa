//! Client for the Larek backend REST API.
//!
//! # Architecture
//!
//! - [`ApiClient`] wraps `reqwest` with JSON decoding and status handling
//! - [`LarekApi`] maps the backend endpoints onto domain types and caches the
//!   product list via `moka` (5 minute TTL)
//! - [`ShopApi`] is the seam the presenter depends on, so tests can swap in a
//!   stub backend
//!
//! # Endpoints
//!
//! ```text
//! GET  {api}/product       - catalog ({ total, items })
//! POST {api}/order         - submit an order, returns { id, total }
//! ```
//!
//! Failures are returned to the caller, which logs them. Nothing is retried.

mod cache;
mod client;
mod larek;

use std::future::Future;

use larek_core::{CatalogItem, OrderRequest, OrderResult};
use thiserror::Error;

pub use client::ApiClient;
pub use larek::LarekApi;

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be sent or the body could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("backend returned {status}: {message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },

    /// The response body was not the JSON we expected.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Backend operations the storefront needs.
pub trait ShopApi: Send + Sync {
    /// Fetch the full catalog.
    fn product_list(&self) -> impl Future<Output = Result<Vec<CatalogItem>, ApiError>> + Send;

    /// Submit an order.
    fn order_products(
        &self,
        order: &OrderRequest,
    ) -> impl Future<Output = Result<OrderResult, ApiError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = ApiError::Status {
            status: reqwest::StatusCode::BAD_REQUEST,
            message: "Wrong total".to_string(),
        };
        assert_eq!(err.to_string(), "backend returned 400 Bad Request: Wrong total");
    }
}
