//! Catalog items served by the backend.

use serde::{Deserialize, Serialize};

use crate::{Price, ProductId};

/// A purchasable catalog item.
///
/// `price` is `None` for items that are on display but cannot be bought.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: ProductId,
    pub title: String,
    pub category: String,
    pub price: Option<Price>,
    /// Image path or absolute URL.
    pub image: String,
    #[serde(default)]
    pub description: String,
}

impl CatalogItem {
    /// Whether the item can be put into the cart.
    #[must_use]
    pub const fn is_purchasable(&self) -> bool {
        self.price.is_some()
    }

    /// The price, treating a missing price as zero.
    #[must_use]
    pub fn price_or_zero(&self) -> Price {
        self.price.unwrap_or_default()
    }
}

/// Response body of `GET /product`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductList {
    pub total: u64,
    pub items: Vec<CatalogItem>,
}
