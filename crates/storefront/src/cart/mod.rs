//! Shopping cart state.
//!
//! The cart is an ordered list of line items, one per product id, in the
//! order they were first added. Totals are always derived from the list.
//!
//! - [`Cart`] - the in-memory line items and their arithmetic
//! - [`CartStore`] - a cart bound to a key-value store, persisted on every change
//! - [`CartView`] - display data for the rendering layer
//! - [`CheckoutDecision`] - where the checkout button sends the shopper

mod checkout;
mod store;
mod view;

use caseback_core::{CurrencyCode, Price, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub use checkout::CheckoutDecision;
pub use store::{CartStore, CartUpdate, PersistOutcome};
pub use view::{CartItemView, CartRow, CartView};

/// A single cart line.
///
/// Serialized with the persisted field names `id`, `name`, `price`,
/// `quantity` and `image`, with `price` as a JSON number carrying the
/// exact decimal digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub name: String,
    #[serde(rename = "price", with = "rust_decimal::serde::arbitrary_precision")]
    pub unit_price: Decimal,
    pub quantity: u32,
    #[serde(rename = "image")]
    pub image_ref: String,
}

impl CartItem {
    /// Price of this line (`unit_price * quantity`).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price.saturating_mul(Decimal::from(self.quantity))
    }
}

/// Product details forwarded by an add-to-cart event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddToCart {
    pub id: ProductId,
    pub name: String,
    pub unit_price: Decimal,
    pub image_ref: String,
}

impl AddToCart {
    /// Create an add-to-cart request.
    #[must_use]
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        unit_price: Decimal,
        image_ref: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unit_price,
            image_ref: image_ref.into(),
        }
    }
}

/// Derived cart totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CartSummary {
    /// Exact sum of `unit_price * quantity` over all lines.
    pub total: Decimal,
    /// Sum of quantities over all lines.
    pub item_count: u64,
}

impl CartSummary {
    /// The total formatted to two decimal places (e.g., "$23000.00").
    #[must_use]
    pub fn display_total(&self, currency: CurrencyCode) -> String {
        Price::new(self.total, currency).display()
    }

    /// The total rounded to two decimal places without a currency symbol.
    #[must_use]
    pub fn total_text(&self) -> String {
        format!("{:.2}", Price::new(self.total, CurrencyCode::default()).rounded())
    }
}

/// Result of applying a quantity delta to a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// No line has the requested id.
    Missing,
    /// The line now has this quantity.
    Updated { quantity: u32 },
    /// The quantity dropped to zero or below and the line was removed.
    Removed,
}

/// An ordered list of cart lines with at most one line per product id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from raw lines, restoring the cart invariants.
    ///
    /// Lines with a zero quantity or a negative price are dropped, and a
    /// repeated id is merged into its first occurrence by summing quantities.
    #[must_use]
    pub fn from_items(items: impl IntoIterator<Item = CartItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            if item.quantity == 0 || is_negative(item.unit_price) {
                continue;
            }
            match cart.items.iter_mut().find(|existing| existing.id == item.id) {
                Some(existing) => existing.quantity = existing.quantity.saturating_add(item.quantity),
                None => cart.items.push(item),
            }
        }
        cart
    }

    /// Lines in display order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up the line for a product.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Quantity of a product in the cart, zero if absent.
    #[must_use]
    pub fn quantity_of(&self, id: &ProductId) -> u32 {
        self.get(id).map_or(0, |item| item.quantity)
    }

    /// Add one unit of a product.
    ///
    /// An existing line is incremented and keeps its cached name, price and
    /// image; otherwise a new line with quantity 1 is appended. Returns the
    /// updated line, or `None` if the request carries a negative price.
    pub fn add_or_increment(&mut self, request: AddToCart) -> Option<&CartItem> {
        if is_negative(request.unit_price) {
            return None;
        }

        let index = match self.items.iter().position(|item| item.id == request.id) {
            Some(index) => index,
            None => {
                self.items.push(CartItem {
                    id: request.id,
                    name: request.name,
                    unit_price: request.unit_price,
                    quantity: 0,
                    image_ref: request.image_ref,
                });
                self.items.len() - 1
            }
        };

        let item = self.items.get_mut(index)?;
        item.quantity = item.quantity.saturating_add(1);
        Some(item)
    }

    /// Apply a signed quantity delta to a line.
    ///
    /// A resulting quantity of zero or less removes the line entirely.
    pub fn change_quantity(&mut self, id: &ProductId, delta: i64) -> QuantityChange {
        let Some(index) = self.items.iter().position(|item| &item.id == id) else {
            return QuantityChange::Missing;
        };

        let current = self.items.get(index).map_or(0, |item| item.quantity);
        let next = i64::from(current).saturating_add(delta);
        if next <= 0 {
            self.items.remove(index);
            return QuantityChange::Removed;
        }

        let quantity = u32::try_from(next).unwrap_or(u32::MAX);
        if let Some(item) = self.items.get_mut(index) {
            item.quantity = quantity;
        }
        QuantityChange::Updated { quantity }
    }

    /// Remove a line. Returns whether a line was removed.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| &item.id != id);
        self.items.len() != before
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Compute totals from the current lines.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        self.items.iter().fold(CartSummary::default(), |acc, item| CartSummary {
            total: acc.total.saturating_add(item.line_total()),
            item_count: acc.item_count + u64::from(item.quantity),
        })
    }
}

impl Serialize for Cart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<CartItem>::deserialize(deserializer).map(Self::from_items)
    }
}

fn is_negative(amount: Decimal) -> bool {
    amount.is_sign_negative() && !amount.is_zero()
}
