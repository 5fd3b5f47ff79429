//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The cart itself lives in the visitor's session as the `"cart"` blob.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use lavs_boutique_core::{
    Cart, CartStore, CartSummary, Notification, Notifier, ProductId, PromoOutcome,
    format_currency,
};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::state::AppState;
use crate::storage::SessionStorage;
use crate::ui::HtmxUi;

/// Cart item display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    pub price: String,
    pub line_total: String,
}

/// Cart display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub item_count: u32,
    pub subtotal: String,
    /// `"FREE"` above the free-shipping threshold.
    pub shipping: String,
    pub tax: String,
    pub total: String,
}

impl CartView {
    /// Build display strings from cart state.
    #[must_use]
    pub fn new(cart: &Cart, summary: &CartSummary) -> Self {
        Self {
            items: cart
                .items()
                .iter()
                .map(|item| CartItemView {
                    id: item.id.to_string(),
                    name: item.name.clone(),
                    quantity: item.quantity,
                    price: item.price.to_string(),
                    line_total: format_currency(item.line_total()),
                })
                .collect(),
            item_count: cart.count(),
            subtotal: format_currency(summary.subtotal),
            shipping: if summary.free_shipping() {
                "FREE".to_string()
            } else {
                format_currency(summary.shipping)
            },
            tax: format_currency(summary.tax),
            total: format_currency(summary.total),
        }
    }
}

/// Form data naming a single product.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub product_id: ProductId,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: ProductId,
    /// Signed change, usually `1` or `-1`.
    pub delta: i64,
}

/// Promo code form data.
#[derive(Debug, Deserialize)]
pub struct PromoForm {
    pub code: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
    pub cart_count: u32,
}

/// Cart contents fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Promo code result fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/promo_message.html")]
pub struct PromoMessageTemplate {
    pub message: String,
    pub success: bool,
}

/// Display cart page.
#[instrument(skip(session))]
pub async fn show(session: Session) -> impl IntoResponse {
    let storage = SessionStorage::load(&session).await;
    let store = CartStore::open(storage, HtmxUi::new());
    let cart = CartView::new(store.cart(), &store.summary());

    CartShowTemplate {
        cart_count: cart.item_count,
        cart,
    }
}

/// Add one unit of a product to the cart (HTMX).
///
/// Name and price come from the catalog. Returns the new badge and triggers
/// `cart-updated` plus a confirmation toast.
#[instrument(skip(state, session), fields(product_id = %form.product_id))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    let product = state
        .catalog()
        .get(&form.product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {}", form.product_id)))?;

    let mut storage = SessionStorage::load(&session).await;
    let mut ui = HtmxUi::new();
    let count = {
        let mut store = CartStore::open(&mut storage, &mut ui);
        let quantity = store.add(product.id.clone(), &product.name, product.price);
        tracing::info!(quantity, "Added to cart");
        store.count()
    };
    storage.commit(&session).await?;
    add_breadcrumb("cart", "Added to cart");

    Ok(ui.respond(CartCountTemplate { count }))
}

/// Change a line's quantity by `delta` (HTMX).
///
/// Dropping to zero removes the line. Returns the cart contents fragment.
#[instrument(skip(session), fields(product_id = %form.product_id, delta = form.delta))]
pub async fn update(session: Session, Form(form): Form<UpdateCartForm>) -> Result<Response> {
    let mut storage = SessionStorage::load(&session).await;
    let mut ui = HtmxUi::new();
    let current = {
        let mut store = CartStore::open(&mut storage, &mut ui);
        let change = store.update_quantity(&form.product_id, form.delta);
        tracing::debug!(?change, "Cart quantity updated");
        CartView::new(store.cart(), &store.summary())
    };
    storage.commit(&session).await?;

    let cart = ui.take_cart().unwrap_or(current);
    Ok(ui.respond(CartItemsTemplate { cart }))
}

/// Remove a line from the cart (HTMX).
#[instrument(skip(session), fields(product_id = %form.product_id))]
pub async fn remove(session: Session, Form(form): Form<ProductForm>) -> Result<Response> {
    let mut storage = SessionStorage::load(&session).await;
    let mut ui = HtmxUi::new();
    let current = {
        let mut store = CartStore::open(&mut storage, &mut ui);
        if store.remove(&form.product_id).is_none() {
            tracing::debug!("Remove requested for product not in cart");
        }
        CartView::new(store.cart(), &store.summary())
    };
    storage.commit(&session).await?;

    let cart = ui.take_cart().unwrap_or(current);
    Ok(ui.respond(CartItemsTemplate { cart }))
}

/// Get cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> impl IntoResponse {
    let storage = SessionStorage::load(&session).await;
    let store = CartStore::open(storage, HtmxUi::new());

    CartCountTemplate {
        count: store.count(),
    }
}

/// Check a promo code (HTMX).
///
/// Codes only produce a message; totals are unchanged.
#[instrument(skip(form))]
pub async fn apply_promo(Form(form): Form<PromoForm>) -> impl IntoResponse {
    let outcome = PromoOutcome::apply(&form.code);
    tracing::info!(code = ?outcome.code, "Promo code checked");

    PromoMessageTemplate {
        success: outcome.code.is_some(),
        message: outcome.message,
    }
}

/// Start the demo checkout.
///
/// An empty cart yields an error toast. Otherwise a notice explains that
/// checkout is not wired to a payment provider.
#[instrument(skip(session))]
pub async fn checkout(session: Session) -> Response {
    let storage = SessionStorage::load(&session).await;
    let mut ui = HtmxUi::new();
    let result = CartStore::open(storage, &mut ui).checkout();

    match result {
        Ok(summary) => {
            tracing::info!(total = %summary.total, "Demo checkout started");
            add_breadcrumb("checkout", "Demo checkout started");
            ui.notify(Notification::success(
                "Proceeding to checkout... This is a demo. In a real application, \
                 this would redirect to a secure checkout page.",
            ));
        }
        Err(e) => tracing::debug!(error = %e, "Checkout refused"),
    }

    ui.respond(())
}
