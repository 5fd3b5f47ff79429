//! Stores that pair cart and wishlist state with their collaborators.
//!
//! The stores never touch a browser, a session, or a template directly. They
//! talk to three capabilities:
//!
//! - [`Persistence`] - a key-value blob store (`"cart"`, `"wishlist"`)
//! - [`Renderer`] - redraws the cart view and count badges
//! - [`crate::Notifier`] - shows a confirmation toast
//!
//! Every mutation writes its state back through [`Persistence`] before
//! returning.

mod cart;
mod wishlist;

use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::cart::{Cart, CartSummary};

pub use cart::{CartStore, CheckoutError};
pub use wishlist::WishlistStore;

/// Persistence keys.
pub mod keys {
    /// JSON array of `{id, name, price, quantity}`.
    pub const CART: &str = "cart";

    /// JSON array of product id strings.
    pub const WISHLIST: &str = "wishlist";
}

/// A string key-value store, modelled on browser local storage.
pub trait Persistence {
    /// Read the raw value stored under `key`.
    fn load(&self, key: &str) -> Option<String>;

    /// Replace the value stored under `key`.
    fn save(&mut self, key: &str, value: String);
}

impl<P: Persistence + ?Sized> Persistence for &mut P {
    fn load(&self, key: &str) -> Option<String> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, value: String) {
        (**self).save(key, value);
    }
}

/// Output surface for cart state.
pub trait Renderer {
    /// Redraw the cart rows and totals, or the empty-state view.
    fn render_cart(&mut self, cart: &Cart, summary: &CartSummary);

    /// Refresh every item-count badge.
    fn render_badges(&mut self, count: u32);
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn render_cart(&mut self, cart: &Cart, summary: &CartSummary) {
        (**self).render_cart(cart, summary);
    }

    fn render_badges(&mut self, count: u32) {
        (**self).render_badges(count);
    }
}

/// In-memory [`Persistence`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw value, e.g. to simulate previously persisted data.
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.entries.insert(key.to_owned(), value.into());
        self
    }
}

impl Persistence for MemoryStorage {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_owned(), value);
    }
}

/// Decode the value under `key`, falling back to the default when the value
/// is absent or malformed.
pub(crate) fn hydrate<T, P>(persistence: &P, key: &str) -> T
where
    T: DeserializeOwned + Default,
    P: Persistence + ?Sized,
{
    let Some(raw) = persistence.load(key) else {
        return T::default();
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(key, error = %e, "discarding malformed persisted state");
            T::default()
        }
    }
}

/// Encode `value` and store it under `key`.
pub(crate) fn persist<T, P>(persistence: &mut P, key: &str, value: &T)
where
    T: Serialize + ?Sized,
    P: Persistence + ?Sized,
{
    match serde_json::to_string(value) {
        Ok(json) => persistence.save(key, json),
        // Cart and wishlist contain only strings, numbers and arrays.
        Err(e) => tracing::error!(key, error = %e, "failed to encode state"),
    }
}
