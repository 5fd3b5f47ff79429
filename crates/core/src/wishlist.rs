//! Wishlisted product ids.

use serde::{Deserialize, Serialize};

use crate::types::ProductId;

/// Membership after a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WishlistState {
    Added,
    Removed,
}

impl WishlistState {
    #[must_use]
    pub const fn is_wishlisted(self) -> bool {
        matches!(self, Self::Added)
    }
}

/// A set of product ids that keeps insertion order for stable persistence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Wishlist {
    ids: Vec<ProductId>,
}

impl Wishlist {
    #[must_use]
    pub const fn new() -> Self {
        Self { ids: Vec::new() }
    }

    /// Build a wishlist, dropping duplicate ids.
    #[must_use]
    pub fn from_ids(ids: impl IntoIterator<Item = ProductId>) -> Self {
        let mut wishlist = Self::new();
        for id in ids {
            if !wishlist.contains(&id) {
                wishlist.ids.push(id);
            }
        }
        wishlist
    }

    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.ids.contains(id)
    }

    /// Insert the id if absent, remove it if present.
    pub fn toggle(&mut self, id: ProductId) -> WishlistState {
        if let Some(index) = self.ids.iter().position(|existing| existing == &id) {
            self.ids.remove(index);
            WishlistState::Removed
        } else {
            self.ids.push(id);
            WishlistState::Added
        }
    }

    #[must_use]
    pub fn ids(&self) -> &[ProductId] {
        &self.ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
