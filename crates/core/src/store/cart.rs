use thiserror::Error;

use super::{Persistence, Renderer, hydrate, keys, persist};
use crate::cart::{Cart, CartItem, CartSummary, QuantityChange};
use crate::notification::{Notification, Notifier};
use crate::types::{Price, ProductId};

/// Reasons checkout cannot start.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,
}

/// The shopper's cart plus the collaborators it reports to.
///
/// `P` stores the `"cart"` blob; `U` is the UI surface that redraws the cart,
/// refreshes badges and shows toasts.
#[derive(Debug)]
pub struct CartStore<P, U> {
    cart: Cart,
    persistence: P,
    ui: U,
}

impl<P, U> CartStore<P, U>
where
    P: Persistence,
    U: Renderer + Notifier,
{
    /// Hydrate the cart from `persistence`.
    ///
    /// A missing or malformed blob yields an empty cart.
    pub fn open(persistence: P, ui: U) -> Self {
        let items: Vec<CartItem> = hydrate(&persistence, keys::CART);
        Self {
            cart: Cart::from_items(items),
            persistence,
            ui,
        }
    }

    /// Current cart contents.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Total units in the cart.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.cart.count()
    }

    /// Totals for the current contents. Never cached.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        self.cart.summary()
    }

    /// Add one unit of a product.
    ///
    /// `name` and `price` are taken as given; they come from the catalog.
    pub fn add(&mut self, id: ProductId, name: &str, price: Price) -> u32 {
        let quantity = self.cart.add(id, name.to_owned(), price);
        self.save();
        self.ui.render_badges(self.cart.count());
        self.ui
            .notify(Notification::success(format!("{name} added to cart!")));
        quantity
    }

    /// Remove a product's line. Removing an id that is not in the cart
    /// changes nothing but still refreshes the view.
    pub fn remove(&mut self, id: &ProductId) -> Option<CartItem> {
        let removed = self.cart.remove(id);
        self.after_remove();
        removed
    }

    /// Shift a line's quantity by `delta`.
    ///
    /// Reaching zero or below removes the line exactly as [`Self::remove`]
    /// would. Unknown ids are ignored.
    pub fn update_quantity(&mut self, id: &ProductId, delta: i64) -> QuantityChange {
        let change = self.cart.update_quantity(id, delta);
        match change {
            QuantityChange::Missing => {}
            QuantityChange::Removed => self.after_remove(),
            QuantityChange::Updated(_) => {
                self.save();
                self.render();
                self.ui.render_badges(self.cart.count());
            }
        }
        change
    }

    /// Redraw the cart view with fresh totals.
    pub fn render(&mut self) {
        let summary = self.cart.summary();
        self.ui.render_cart(&self.cart, &summary);
    }

    /// Begin the demo checkout.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] (and shows an error toast) when
    /// there is nothing to buy.
    pub fn checkout(&mut self) -> Result<CartSummary, CheckoutError> {
        if self.cart.is_empty() {
            self.ui.notify(Notification::error("Your cart is empty!"));
            return Err(CheckoutError::EmptyCart);
        }
        Ok(self.cart.summary())
    }

    /// Borrow the persistence collaborator.
    #[must_use]
    pub const fn persistence(&self) -> &P {
        &self.persistence
    }

    /// Borrow the UI collaborator.
    #[must_use]
    pub const fn ui(&self) -> &U {
        &self.ui
    }

    fn after_remove(&mut self) {
        self.save();
        self.render();
        self.ui.render_badges(self.cart.count());
        self.ui.notify(Notification::success("Item removed from cart"));
    }

    fn save(&mut self) {
        persist(&mut self.persistence, keys::CART, &self.cart);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::store::MemoryStorage;

    #[derive(Debug, Default)]
    struct RecordingUi {
        carts: Vec<(usize, CartSummary)>,
        badges: Vec<u32>,
        toasts: Vec<Notification>,
    }

    impl Renderer for RecordingUi {
        fn render_cart(&mut self, cart: &Cart, summary: &CartSummary) {
            self.carts.push((cart.items().len(), *summary));
        }

        fn render_badges(&mut self, count: u32) {
            self.badges.push(count);
        }
    }

    impl Notifier for RecordingUi {
        fn notify(&mut self, notification: Notification) {
            self.toasts.push(notification);
        }
    }

    fn store() -> CartStore<MemoryStorage, RecordingUi> {
        CartStore::open(MemoryStorage::new(), RecordingUi::default())
    }

    fn scarf() -> ProductId {
        ProductId::from(1_u64)
    }

    fn persisted(store: &CartStore<MemoryStorage, RecordingUi>) -> serde_json::Value {
        serde_json::from_str(&store.persistence().load(keys::CART).unwrap()).unwrap()
    }

    #[test]
    fn test_add_twice_example() {
        let mut store = store();
        store.add(scarf(), "Scarf", Price::from_cents(4500));
        store.add(scarf(), "Scarf", Price::from_cents(4500));

        assert_eq!(
            persisted(&store),
            serde_json::json!([{"id": "1", "name": "Scarf", "price": 45.0, "quantity": 2}])
        );
        assert_eq!(store.count(), 2);

        let summary = store.summary();
        assert_eq!(summary.subtotal, Decimal::new(9000, 2));
        assert_eq!(summary.shipping, Decimal::new(10, 0));
        assert_eq!(summary.tax, Decimal::new(720, 2));
        assert_eq!(summary.total, Decimal::new(10720, 2));
    }

    #[test]
    fn test_add_refreshes_badges_and_notifies() {
        let mut store = store();
        store.add(scarf(), "Scarf", Price::from_cents(4500));

        assert_eq!(store.ui().badges, [1]);
        assert_eq!(
            store.ui().toasts,
            [Notification::success("Scarf added to cart!")]
        );
        assert!(store.ui().carts.is_empty());
    }

    #[test]
    fn test_remove_missing_leaves_cart_unchanged() {
        let mut store = store();
        store.add(scarf(), "Scarf", Price::from_cents(4500));
        let before = store.cart().clone();

        assert!(store.remove(&ProductId::from(99_u64)).is_none());
        assert_eq!(store.cart(), &before);
        assert_eq!(
            store.ui().toasts.last(),
            Some(&Notification::success("Item removed from cart"))
        );
    }

    #[test]
    fn test_remove_persists_and_renders() {
        let mut store = store();
        store.add(scarf(), "Scarf", Price::from_cents(4500));
        let removed = store.remove(&scarf()).unwrap();

        assert_eq!(removed.quantity, 1);
        assert_eq!(persisted(&store), serde_json::json!([]));
        assert_eq!(store.ui().carts.len(), 1);
        assert_eq!(store.ui().badges.last(), Some(&0));
    }

    #[test]
    fn test_update_to_zero_delegates_to_remove() {
        let mut store = store();
        store.add(scarf(), "Scarf", Price::from_cents(4500));
        store.add(scarf(), "Scarf", Price::from_cents(4500));

        assert_eq!(
            store.update_quantity(&scarf(), -2),
            QuantityChange::Removed
        );
        assert!(store.cart().is_empty());
        assert_eq!(persisted(&store), serde_json::json!([]));
        assert_eq!(
            store.ui().toasts.last(),
            Some(&Notification::success("Item removed from cart"))
        );
    }

    #[test]
    fn test_update_positive_persists_without_toast() {
        let mut store = store();
        store.add(scarf(), "Scarf", Price::from_cents(4500));
        let toasts_before = store.ui().toasts.len();

        assert_eq!(
            store.update_quantity(&scarf(), 2),
            QuantityChange::Updated(3)
        );
        assert_eq!(persisted(&store)[0]["quantity"], 3);
        assert_eq!(store.ui().toasts.len(), toasts_before);
        assert_eq!(store.ui().carts.len(), 1);
        assert_eq!(store.ui().badges.last(), Some(&3));
    }

    #[test]
    fn test_update_missing_is_silent() {
        let mut store = store();
        assert_eq!(
            store.update_quantity(&scarf(), 1),
            QuantityChange::Missing
        );
        assert!(store.persistence().load(keys::CART).is_none());
        assert!(store.ui().toasts.is_empty());
    }

    #[test]
    fn test_open_hydrates_numeric_ids() {
        let storage = MemoryStorage::new().with(
            keys::CART,
            r#"[{"id": 3, "name": "Tote", "price": 62.5, "quantity": 2}]"#,
        );
        let store = CartStore::open(storage, RecordingUi::default());

        let item = store.cart().get(&ProductId::new("3")).unwrap();
        assert_eq!(item.name, "Tote");
        assert_eq!(item.price.amount(), Decimal::new(625, 1));
        assert_eq!(store.count(), 2);
    }

    #[test]
    fn test_open_discards_malformed_blob() {
        let storage = MemoryStorage::new().with(keys::CART, "{broken");
        let store = CartStore::open(storage, RecordingUi::default());
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_open_discards_negative_quantities() {
        let storage = MemoryStorage::new().with(
            keys::CART,
            r#"[{"id": 3, "name": "Tote", "price": 62.5, "quantity": -1}]"#,
        );
        let store = CartStore::open(storage, RecordingUi::default());
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_render_uses_current_summary() {
        let mut store = store();
        store.add(scarf(), "Scarf", Price::from_cents(6000));
        store.add(scarf(), "Scarf", Price::from_cents(6000));
        store.render();

        let (lines, summary) = store.ui().carts.last().copied().unwrap();
        assert_eq!(lines, 1);
        assert_eq!(summary.shipping, Decimal::ZERO);
    }

    #[test]
    fn test_checkout_empty_cart_errors() {
        let mut store = store();
        assert_eq!(store.checkout(), Err(CheckoutError::EmptyCart));
        assert_eq!(
            store.ui().toasts,
            [Notification::error("Your cart is empty!")]
        );
    }

    #[test]
    fn test_checkout_returns_summary() {
        let mut store = store();
        store.add(scarf(), "Scarf", Price::from_cents(4500));
        let summary = store.checkout().unwrap();
        assert_eq!(summary.subtotal, Decimal::new(4500, 2));
    }

    #[test]
    fn test_borrowed_collaborators() {
        let mut storage = MemoryStorage::new();
        let mut ui = RecordingUi::default();
        {
            let mut store = CartStore::open(&mut storage, &mut ui);
            store.add(scarf(), "Scarf", Price::from_cents(4500));
        }

        let reopened = CartStore::open(&mut storage, &mut ui);
        assert_eq!(reopened.count(), 1);
        assert_eq!(ui.badges, [1]);
    }
}
