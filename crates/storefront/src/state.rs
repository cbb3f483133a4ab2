//! Storefront state driven by the rendering layer.
//!
//! [`Storefront`] bundles the configuration, the persisted cart, the
//! catalog and the current filter result. The rendering layer forwards
//! user events to it and renders what it returns.

use caseback_core::ProductId;
use tracing::instrument;

use crate::cart::{AddToCart, CartStore, CartUpdate, CartView, CheckoutDecision};
use crate::catalog::{Catalog, CatalogVisibility, FilterCriteria, compute_visibility};
use crate::config::StorefrontConfig;
use crate::error::{Result, StorefrontError};
use crate::storage::KeyValueStore;

/// Storefront state for one shopper session.
#[derive(Debug)]
pub struct Storefront<S> {
    config: StorefrontConfig,
    cart: CartStore<S>,
    catalog: Catalog,
    criteria: FilterCriteria,
    visibility: CatalogVisibility,
}

impl<S: KeyValueStore> Storefront<S> {
    /// Create the storefront, hydrating the cart from `storage`.
    ///
    /// Every product starts visible.
    pub fn new(config: StorefrontConfig, storage: S, catalog: Catalog) -> Self {
        let cart = CartStore::from_config(storage, &config.cart);
        let criteria = FilterCriteria::default();
        let visibility = compute_visibility(&catalog, &criteria);

        Self {
            config,
            cart,
            catalog,
            criteria,
            visibility,
        }
    }

    /// Create the storefront with configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn from_env(storage: S, catalog: Catalog) -> Result<Self> {
        let config = StorefrontConfig::from_env()?;
        Ok(Self::new(config, storage, catalog))
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// Get a reference to the persisted cart.
    #[must_use]
    pub const fn cart(&self) -> &CartStore<S> {
        &self.cart
    }

    /// Get a reference to the catalog.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The criteria the current visibility was computed from.
    #[must_use]
    pub const fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// The current visibility of products and categories.
    #[must_use]
    pub const fn visibility(&self) -> &CatalogVisibility {
        &self.visibility
    }

    // =========================================================================
    // Cart events
    // =========================================================================

    /// Add one unit of a catalog product to the cart.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::UnknownProduct` if the catalog has no
    /// product with this id.
    #[instrument(skip(self, id), fields(product_id = %id))]
    pub fn add_to_cart(&mut self, id: &ProductId) -> Result<CartUpdate> {
        let Some(product) = self.catalog.product(id) else {
            tracing::warn!("Add-to-cart for product missing from catalog");
            return Err(StorefrontError::UnknownProduct(id.clone()));
        };

        Ok(self.cart.add_or_increment(AddToCart::from(product)))
    }

    /// Apply a signed quantity delta to a cart line.
    pub fn change_quantity(&mut self, id: &ProductId, delta: i64) -> CartUpdate {
        self.cart.change_quantity(id, delta)
    }

    /// Remove a cart line.
    pub fn remove_item(&mut self, id: &ProductId) -> CartUpdate {
        self.cart.remove_item(id)
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) -> CartUpdate {
        self.cart.clear()
    }

    /// Display data for the cart panel.
    #[must_use]
    pub fn cart_view(&self) -> CartView {
        CartView::from_cart(self.cart.cart(), &self.config.display)
    }

    /// Where the checkout button should go.
    #[must_use]
    pub fn checkout(&self) -> CheckoutDecision {
        let decision = CheckoutDecision::for_cart(self.cart.cart(), &self.config.checkout);
        tracing::debug!(location = decision.location(), "Checkout requested");
        decision
    }

    // =========================================================================
    // Catalog events
    // =========================================================================

    /// Re-filter the catalog from the three filter control values.
    ///
    /// The previous criteria and visibility are kept if parsing fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the price range cannot be parsed.
    #[instrument(skip(self))]
    pub fn apply_filters(
        &mut self,
        search_text: &str,
        brand: &str,
        price_range: &str,
    ) -> Result<&CatalogVisibility> {
        let criteria = FilterCriteria::parse(search_text, brand, price_range)?;
        Ok(self.set_criteria(criteria))
    }

    /// Re-filter the catalog from the header search box.
    #[instrument(skip(self))]
    pub fn search(&mut self, text: &str) -> &CatalogVisibility {
        self.set_criteria(FilterCriteria::search_only(text))
    }

    /// Replace the criteria and recompute visibility for the whole catalog.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) -> &CatalogVisibility {
        self.visibility = compute_visibility(&self.catalog, &criteria);
        self.criteria = criteria;
        tracing::debug!(
            visible = self.visibility.visible_count(),
            total = self.catalog.product_count(),
            "Catalog filtered"
        );
        &self.visibility
    }

    /// Swap in a re-rendered catalog, keeping the current criteria.
    pub fn replace_catalog(&mut self, catalog: Catalog) -> &CatalogVisibility {
        self.catalog = catalog;
        self.visibility = compute_visibility(&self.catalog, &self.criteria);
        &self.visibility
    }
}
