//! Cart bound to a key-value store.
//!
//! The store hydrates the cart once when opened and overwrites the stored
//! value after every mutation. Storage problems are logged and never
//! surface to the caller: the in-memory cart stays authoritative.

use caseback_core::ProductId;
use tracing::instrument;

use super::{AddToCart, Cart, CartItem, CartSummary, QuantityChange};
use crate::config::CartConfig;
use crate::storage::KeyValueStore;

/// What happened to the persisted copy during a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistOutcome {
    /// The full cart was written.
    Written,
    /// Nothing changed, so nothing was written.
    Skipped,
    /// The write failed; the in-memory cart is ahead of storage.
    Failed,
}

/// Result of a cart mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartUpdate {
    /// Totals recomputed after the mutation.
    pub summary: CartSummary,
    /// Whether the rendering layer should open the cart panel.
    pub reveal_cart: bool,
    /// What happened to the persisted copy.
    pub persistence: PersistOutcome,
}

impl CartUpdate {
    /// Whether the stored copy matches the in-memory cart.
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        matches!(self.persistence, PersistOutcome::Written | PersistOutcome::Skipped)
    }
}

/// A cart persisted to a key-value store.
#[derive(Debug)]
pub struct CartStore<S> {
    cart: Cart,
    storage: S,
    storage_key: String,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Open the cart stored under `storage_key`.
    ///
    /// A missing, unreadable or unparseable value yields an empty cart.
    #[instrument(skip(storage))]
    pub fn open(storage: S, storage_key: &str) -> Self {
        let cart = load_cart(&storage, storage_key);
        tracing::debug!(lines = cart.len(), "Cart hydrated");

        Self {
            cart,
            storage,
            storage_key: storage_key.to_string(),
        }
    }

    /// Open the cart using the configured storage key.
    pub fn from_config(storage: S, config: &CartConfig) -> Self {
        Self::open(storage, &config.storage_key)
    }

    /// The current cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Lines in display order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        self.cart.items()
    }

    /// Totals computed from the current lines.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        self.cart.summary()
    }

    /// Key the cart is persisted under.
    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// The backing store.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Consume the store and return the backing storage.
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Add one unit of a product and ask for the cart to be shown.
    #[instrument(skip(self, request), fields(product_id = %request.id))]
    pub fn add_or_increment(&mut self, request: AddToCart) -> CartUpdate {
        let Some(quantity) = self.cart.add_or_increment(request).map(|item| item.quantity) else {
            tracing::warn!("Rejected add-to-cart with a negative price");
            return self.update(false, PersistOutcome::Skipped);
        };

        tracing::debug!(quantity, "Added to cart");
        let persistence = self.persist();
        self.update(true, persistence)
    }

    /// Apply a signed quantity delta. Unknown ids are ignored.
    #[instrument(skip(self, id), fields(product_id = %id))]
    pub fn change_quantity(&mut self, id: &ProductId, delta: i64) -> CartUpdate {
        match self.cart.change_quantity(id, delta) {
            QuantityChange::Missing => {
                tracing::debug!("Quantity change for product not in cart");
                self.update(false, PersistOutcome::Skipped)
            }
            QuantityChange::Updated { quantity } => {
                tracing::debug!(quantity, "Cart quantity updated");
                let persistence = self.persist();
                self.update(false, persistence)
            }
            QuantityChange::Removed => {
                tracing::debug!("Cart line removed at zero quantity");
                let persistence = self.persist();
                self.update(false, persistence)
            }
        }
    }

    /// Remove a line. Unknown ids are ignored.
    #[instrument(skip(self, id), fields(product_id = %id))]
    pub fn remove_item(&mut self, id: &ProductId) -> CartUpdate {
        if self.cart.remove(id) {
            tracing::debug!("Removed from cart");
        }
        let persistence = self.persist();
        self.update(false, persistence)
    }

    /// Remove every line.
    #[instrument(skip(self))]
    pub fn clear(&mut self) -> CartUpdate {
        self.cart.clear();
        tracing::debug!("Cart cleared");
        let persistence = self.persist();
        self.update(false, persistence)
    }

    /// Overwrite the stored cart with the in-memory one.
    fn persist(&mut self) -> PersistOutcome {
        let json = match serde_json::to_string(&self.cart) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to serialize cart: {e}");
                return PersistOutcome::Failed;
            }
        };

        match self.storage.set(&self.storage_key, &json) {
            Ok(()) => PersistOutcome::Written,
            Err(e) => {
                tracing::error!("Failed to persist cart {}: {e}", self.storage_key);
                PersistOutcome::Failed
            }
        }
    }

    fn update(&self, reveal_cart: bool, persistence: PersistOutcome) -> CartUpdate {
        CartUpdate {
            summary: self.cart.summary(),
            reveal_cart,
            persistence,
        }
    }
}

// =============================================================================
// Hydration
// =============================================================================

/// Read the persisted cart, falling back to an empty cart on any problem.
fn load_cart<S: KeyValueStore>(storage: &S, key: &str) -> Cart {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Cart::new(),
        Err(e) => {
            tracing::warn!("Failed to read persisted cart {key}: {e}");
            return Cart::new();
        }
    };

    match serde_json::from_str::<Option<Vec<CartItem>>>(&raw) {
        Ok(Some(items)) => {
            let stored = items.len();
            let cart = Cart::from_items(items);
            if cart.len() != stored {
                tracing::warn!(
                    stored,
                    kept = cart.len(),
                    "Persisted cart violated invariants and was normalized"
                );
            }
            cart
        }
        Ok(None) => Cart::new(),
        Err(e) => {
            tracing::warn!("Discarding unparseable cart {key}: {e}");
            Cart::new()
        }
    }
}
