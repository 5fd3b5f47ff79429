//! Cart line items and pricing rules.
//!
//! [`Cart`] is plain state: it knows nothing about persistence or rendering.
//! [`crate::store::CartStore`] wraps it with those collaborators.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// Orders with a subtotal strictly above this ship for free.
pub const FREE_SHIPPING_THRESHOLD: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Flat shipping fee charged at or below the threshold.
pub const FLAT_SHIPPING: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

/// Sales tax rate applied to the subtotal (8%).
pub const TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// A single product line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    /// Always at least 1 while the item is in a cart.
    pub quantity: u32,
}

impl CartItem {
    /// `price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price.amount() * Decimal::from(self.quantity)
    }
}

/// Derived totals for a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl CartSummary {
    /// Compute shipping, tax and total for a subtotal.
    #[must_use]
    pub fn from_subtotal(subtotal: Decimal) -> Self {
        let shipping = if subtotal > FREE_SHIPPING_THRESHOLD {
            Decimal::ZERO
        } else {
            FLAT_SHIPPING
        };
        let tax = subtotal * TAX_RATE;

        Self {
            subtotal,
            shipping,
            tax,
            total: subtotal + shipping + tax,
        }
    }

    /// Whether the order qualifies for free shipping.
    #[must_use]
    pub fn free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }
}

/// What an [`Cart::update_quantity`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// No item with that id.
    Missing,
    /// The item now has this quantity.
    Updated(u32),
    /// The quantity dropped to zero or below and the item was removed.
    Removed,
}

/// Ordered cart contents, at most one line per product id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from raw items, restoring the one-line-per-id invariant.
    ///
    /// Zero-quantity lines are dropped and duplicate ids are merged into the
    /// first occurrence (quantities summed).
    #[must_use]
    pub fn from_items(items: impl IntoIterator<Item = CartItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            if item.quantity == 0 {
                continue;
            }
            if let Some(existing) = cart.find_mut(&item.id) {
                existing.quantity = existing.quantity.saturating_add(item.quantity);
            } else {
                cart.items.push(item);
            }
        }
        cart
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up a line by product id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    fn find_mut(&mut self, id: &ProductId) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|item| &item.id == id)
    }

    /// Add one unit of a product, appending a new line if needed.
    ///
    /// Returns the line's new quantity.
    pub fn add(&mut self, id: ProductId, name: String, price: Price) -> u32 {
        if let Some(item) = self.find_mut(&id) {
            item.quantity = item.quantity.saturating_add(1);
            return item.quantity;
        }

        self.items.push(CartItem {
            id,
            name,
            price,
            quantity: 1,
        });
        1
    }

    /// Remove a line. Returns the removed item, if any.
    pub fn remove(&mut self, id: &ProductId) -> Option<CartItem> {
        let index = self.items.iter().position(|item| &item.id == id)?;
        Some(self.items.remove(index))
    }

    /// Shift a line's quantity by `delta`, removing it at zero or below.
    pub fn update_quantity(&mut self, id: &ProductId, delta: i64) -> QuantityChange {
        let Some(item) = self.find_mut(id) else {
            return QuantityChange::Missing;
        };

        let next = i64::from(item.quantity).saturating_add(delta);
        if next <= 0 {
            self.remove(id);
            return QuantityChange::Removed;
        }

        item.quantity = u32::try_from(next).unwrap_or(u32::MAX);
        QuantityChange::Updated(item.quantity)
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.items
            .iter()
            .fold(0_u32, |sum, item| sum.saturating_add(item.quantity))
    }

    /// Subtotal, shipping, tax and total for the current contents.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        let subtotal = self.items.iter().map(CartItem::line_total).sum();
        CartSummary::from_subtotal(subtotal)
    }
}
