//! Caseback Core - Shared value types.
//!
//! This crate provides the value types shared by the Caseback components:
//! - `storefront` - Cart store, catalog filter and the facade the rendering layer drives
//! - `integration-tests` - Cross-module scenarios and fixtures
//!
//! # Architecture
//!
//! The core crate contains only types - no storage access, no rendering,
//! no logging. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs and prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
