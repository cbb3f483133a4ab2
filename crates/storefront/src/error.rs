//! Unified error handling.
//!
//! Provides a unified `StorefrontError` type for the facade. Cart
//! operations never fail; errors come from configuration, catalog input
//! and filter input supplied by the rendering layer.

use caseback_core::ProductId;
use thiserror::Error;

use crate::catalog::{CatalogError, FilterError};
use crate::config::ConfigError;

/// Storefront-level error type.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog input was invalid.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Filter control values were invalid.
    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),

    /// An add-to-cart event named a product the catalog does not have.
    #[error("Unknown product: {0}")]
    UnknownProduct(ProductId),
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storefront_error_display() {
        let err = StorefrontError::UnknownProduct(ProductId::new("rolex-123"));
        assert_eq!(err.to_string(), "Unknown product: rolex-123");

        let err = StorefrontError::from(FilterError::InvalidBound("cheap".to_string()));
        assert_eq!(err.to_string(), "Filter error: Invalid price bound: \"cheap\"");
    }

    #[test]
    fn test_from_conversions() {
        let err: StorefrontError = CatalogError::DuplicateProduct(ProductId::new("1")).into();
        assert!(matches!(err, StorefrontError::Catalog(_)));

        let err: StorefrontError =
            ConfigError::InvalidEnvVar("CART_STORAGE_KEY".to_string(), "empty".to_string()).into();
        assert!(matches!(err, StorefrontError::Config(_)));
    }
}
