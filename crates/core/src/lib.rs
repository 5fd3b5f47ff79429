//! Lavs Boutique Core - cart, wishlist and notification state.
//!
//! This crate holds the shopper-side state of the boutique and the rules
//! around it:
//! - [`cart`] - line items, quantity rules, shipping and tax
//! - [`wishlist`] - the set of saved product ids
//! - [`store`] - [`CartStore`] and [`WishlistStore`], which persist after
//!   every mutation and report to a [`Renderer`] and a [`Notifier`]
//! - [`notification`] - toasts, at most one visible at a time
//! - [`promo`] - demo promo codes
//!
//! # Architecture
//!
//! No I/O lives here. Storage and rendering are capabilities passed in by
//! the caller, so the same stores run against a browser-like key-value blob,
//! an HTTP session, or an in-memory map in tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod notification;
pub mod promo;
pub mod store;
pub mod types;
pub mod wishlist;

pub use cart::{Cart, CartItem, CartSummary, QuantityChange};
pub use notification::{DISMISS_AFTER, Notification, NotificationKind, NotificationSlot, Notifier};
pub use promo::{PromoBenefit, PromoCode, PromoOutcome};
pub use store::{CartStore, CheckoutError, MemoryStorage, Persistence, Renderer, WishlistStore};
pub use types::*;
pub use wishlist::{Wishlist, WishlistState};
