//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Product grid (?category=, ?clear=true)
//! GET  /health                 - Health check
//! POST /search                 - Search prompt acknowledgement (toast only)
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add to cart (returns badge, triggers cart-updated)
//! POST /cart/update            - Update quantity (returns cart_items fragment)
//! POST /cart/remove            - Remove item (returns cart_items fragment)
//! GET  /cart/count             - Cart count badge (fragment)
//! POST /cart/promo             - Check a promo code (fragment)
//! POST /checkout               - Demo checkout (toast only)
//!
//! # Wishlist
//! GET  /wishlist               - Wishlisted ids (JSON)
//! POST /wishlist/toggle        - Toggle a product (returns heart button)
//!
//! # Forms
//! GET  /contact                - Contact page
//! POST /contact                - Contact form (returns message fragment)
//! POST /newsletter             - Newsletter signup (toast only)
//! ```

pub mod cart;
pub mod contact;
pub mod home;
pub mod newsletter;
pub mod search;
pub mod wishlist;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
        .route("/promo", post(cart::apply_promo))
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::index))
        .route("/toggle", post(wishlist::toggle))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .nest("/cart", cart_routes())
        .route("/checkout", post(cart::checkout))
        .nest("/wishlist", wishlist_routes())
        .route("/contact", get(contact::show).post(contact::submit))
        .route("/newsletter", post(newsletter::subscribe))
        .route("/search", post(search::search))
}
