//! Core types for the Larek storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod order;
pub mod price;
pub mod product;

pub use id::*;
pub use order::{
    FormErrors, OrderDraft, OrderField, OrderFieldError, OrderRequest, OrderResult, PaymentMethod,
};
pub use price::Price;
pub use product::{CatalogItem, ProductList};
