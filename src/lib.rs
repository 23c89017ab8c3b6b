//! Storefront
//!
//! Storefront is the core of a small online shop: a product catalog, a cart, a
//! staged checkout that turns the cart into immutable orders, a wishlist and a
//! mock sign-in service, all persisted through a key-value storage backend.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod context;
pub mod fixtures;
pub mod observability;
pub mod orders;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod receipt;
pub mod storage;
pub mod wishlist;

pub use context::{Storefront, StorefrontInitError, StorefrontSettings};
