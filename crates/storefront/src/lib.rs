//! Caseback Storefront library.
//!
//! Cart and catalog state for the watch storefront. The rendering layer
//! owns markup and browser storage; this crate owns the data they show.
//!
//! # Modules
//!
//! - [`cart`] - Cart lines, totals, persistence, view data and checkout gate
//! - [`catalog`] - Products by category and visibility filtering
//! - [`storage`] - Key-value store the cart is persisted to
//! - [`config`] - Environment configuration
//! - [`state`] - The [`Storefront`] facade
//!
//! # Example
//!
//! ```
//! use caseback_core::ProductId;
//! use caseback_storefront::catalog::{Catalog, Category, Product};
//! use caseback_storefront::config::StorefrontConfig;
//! use caseback_storefront::storage::MemoryStore;
//! use caseback_storefront::Storefront;
//! use rust_decimal::Decimal;
//!
//! let rolex = Category::new("Rolex").with_product(Product::new(
//!     "sub",
//!     "Submariner",
//!     Decimal::new(9000, 0),
//!     "img/sub.jpg",
//!     "Rolex",
//! ));
//! let catalog = Catalog::from_categories([rolex]).unwrap();
//! let mut storefront = Storefront::new(StorefrontConfig::default(), MemoryStore::new(), catalog);
//!
//! let update = storefront.add_to_cart(&ProductId::new("sub")).unwrap();
//! assert!(update.reveal_cart);
//! assert_eq!(storefront.cart_view().subtotal, "$9000.00");
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod state;
pub mod storage;

pub use error::{Result, StorefrontError};
pub use state::Storefront;
