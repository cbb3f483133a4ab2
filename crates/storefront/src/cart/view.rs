//! Cart display data for the rendering layer.

use caseback_core::{CurrencyCode, Price};

use super::{Cart, CartItem};
use crate::config::DisplayConfig;

/// Cart item display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub image: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

/// One row of the rendered cart list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartRow {
    /// Placeholder shown instead of an empty list.
    Empty { message: String },
    /// A cart line.
    Item(CartItemView),
}

/// Cart display data.
///
/// `rows` is never empty: an empty cart renders a single
/// [`CartRow::Empty`] placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub rows: Vec<CartRow>,
    pub subtotal: String,
    pub item_count: u64,
}

impl CartView {
    /// Create an empty cart view.
    #[must_use]
    pub fn empty(display: &DisplayConfig) -> Self {
        Self {
            rows: vec![CartRow::Empty {
                message: display.empty_cart_message.clone(),
            }],
            subtotal: Price::new(rust_decimal::Decimal::ZERO, display.currency).display(),
            item_count: 0,
        }
    }

    /// Build the view for a cart.
    #[must_use]
    pub fn from_cart(cart: &Cart, display: &DisplayConfig) -> Self {
        if cart.is_empty() {
            return Self::empty(display);
        }

        let summary = cart.summary();
        Self {
            rows: cart
                .items()
                .iter()
                .map(|item| CartRow::Item(CartItemView::from_item(item, display.currency)))
                .collect(),
            subtotal: summary.display_total(display.currency),
            item_count: summary.item_count,
        }
    }

    /// Whether the view shows the empty-cart placeholder.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self.rows.as_slice(), [CartRow::Empty { .. }])
    }

    /// Item rows, skipping the placeholder.
    pub fn items(&self) -> impl Iterator<Item = &CartItemView> {
        self.rows.iter().filter_map(|row| match row {
            CartRow::Item(item) => Some(item),
            CartRow::Empty { .. } => None,
        })
    }
}

// =============================================================================
// Type Conversions
// =============================================================================

impl CartItemView {
    fn from_item(item: &CartItem, currency: CurrencyCode) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            image: item.image_ref.clone(),
            quantity: item.quantity,
            price: Price::new(item.unit_price, currency).display(),
            line_price: Price::new(item.line_total(), currency).display(),
        }
    }
}
