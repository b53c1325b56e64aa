//! Larek Core - Shared domain types.
//!
//! This crate provides the types shared by the storefront binary and its
//! tests:
//! - catalog items as served by the backend `GET /product` endpoint
//! - prices and their display format
//! - the checkout order draft, its fields and validation errors
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no rendering.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, catalog items and order types

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
