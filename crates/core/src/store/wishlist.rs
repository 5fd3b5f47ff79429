use super::{Persistence, hydrate, keys, persist};
use crate::notification::{Notification, Notifier};
use crate::types::ProductId;
use crate::wishlist::{Wishlist, WishlistState};

/// The shopper's wishlist plus its persistence and toast surface.
#[derive(Debug)]
pub struct WishlistStore<P, N> {
    wishlist: Wishlist,
    persistence: P,
    notifier: N,
}

impl<P, N> WishlistStore<P, N>
where
    P: Persistence,
    N: Notifier,
{
    /// Hydrate the wishlist from `persistence`, empty if absent or malformed.
    pub fn open(persistence: P, notifier: N) -> Self {
        let ids: Vec<ProductId> = hydrate(&persistence, keys::WISHLIST);
        Self {
            wishlist: Wishlist::from_ids(ids),
            persistence,
            notifier,
        }
    }

    /// Flip membership of `id`, persist, and confirm to the shopper.
    pub fn toggle(&mut self, id: ProductId) -> WishlistState {
        let state = self.wishlist.toggle(id);
        persist(&mut self.persistence, keys::WISHLIST, &self.wishlist);

        let message = match state {
            WishlistState::Added => "Added to wishlist!",
            WishlistState::Removed => "Removed from wishlist",
        };
        self.notifier.notify(Notification::success(message));
        state
    }

    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.wishlist.contains(id)
    }

    #[must_use]
    pub fn ids(&self) -> &[ProductId] {
        self.wishlist.ids()
    }

    #[must_use]
    pub const fn wishlist(&self) -> &Wishlist {
        &self.wishlist
    }

    #[must_use]
    pub const fn persistence(&self) -> &P {
        &self.persistence
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::notification::NotificationSlot;
    use crate::store::MemoryStorage;

    #[test]
    fn test_toggle_twice_restores_state_and_persists_each_time() {
        let mut slot = NotificationSlot::new();
        let mut store = WishlistStore::open(MemoryStorage::new(), &mut slot);
        let id = ProductId::new("12");

        assert_eq!(store.toggle(id.clone()), WishlistState::Added);
        assert_eq!(
            store.persistence().load(keys::WISHLIST).as_deref(),
            Some(r#"["12"]"#)
        );

        assert_eq!(store.toggle(id.clone()), WishlistState::Removed);
        assert!(!store.contains(&id));
        assert_eq!(
            store.persistence().load(keys::WISHLIST).as_deref(),
            Some("[]")
        );

        assert_eq!(slot.current(), Some(&Notification::success("Removed from wishlist")));
    }

    #[test]
    fn test_added_message() {
        let mut slot = NotificationSlot::new();
        let mut store = WishlistStore::open(MemoryStorage::new(), &mut slot);
        store.toggle(ProductId::new("1"));

        assert_eq!(slot.take(), Some(Notification::success("Added to wishlist!")));
    }

    #[test]
    fn test_open_reads_existing_ids() {
        let storage = MemoryStorage::new().with(keys::WISHLIST, r#"["5", 6, "5"]"#);
        let store = WishlistStore::open(storage, NotificationSlot::new());

        assert!(store.contains(&ProductId::new("5")));
        assert!(store.contains(&ProductId::new("6")));
        assert_eq!(store.ids().len(), 2);
    }

    #[test]
    fn test_open_malformed_is_empty() {
        let storage = MemoryStorage::new().with(keys::WISHLIST, "\"oops\"");
        let store = WishlistStore::open(storage, NotificationSlot::new());
        assert!(store.wishlist().is_empty());
    }
}
