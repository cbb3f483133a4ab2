//! Checkout redirect decision.

use super::Cart;
use crate::config::CheckoutConfig;

/// Where the checkout button sends the shopper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutDecision {
    /// The cart has lines; continue to the checkout page.
    Proceed { location: String },
    /// The cart is empty; show the notice and go back to the shop.
    EmptyCart { location: String, notice: String },
}

impl CheckoutDecision {
    /// Decide based on the current cart contents.
    #[must_use]
    pub fn for_cart(cart: &Cart, config: &CheckoutConfig) -> Self {
        if cart.is_empty() {
            Self::EmptyCart {
                location: config.shop_path.clone(),
                notice: config.empty_cart_notice.clone(),
            }
        } else {
            Self::Proceed {
                location: config.checkout_path.clone(),
            }
        }
    }

    /// Redirect target.
    #[must_use]
    pub fn location(&self) -> &str {
        match self {
            Self::Proceed { location } | Self::EmptyCart { location, .. } => location,
        }
    }

    /// Whether checkout can proceed.
    #[must_use]
    pub const fn is_proceed(&self) -> bool {
        matches!(self, Self::Proceed { .. })
    }
}
