//! Wishlist route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, Json, extract::State, response::Response};
use tower_sessions::Session;
use tracing::instrument;

use lavs_boutique_core::WishlistStore;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::routes::cart::ProductForm;
use crate::state::AppState;
use crate::storage::SessionStorage;
use crate::ui::HtmxUi;

/// Wishlist heart button fragment (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/wishlist_button.html")]
pub struct WishlistButtonTemplate {
    pub product_id: String,
    pub wishlisted: bool,
}

/// Toggle a product on the wishlist (HTMX).
///
/// Only catalog products can be saved. Returns the re-rendered heart button
/// and a confirmation toast.
#[instrument(skip(state, session), fields(product_id = %form.product_id))]
pub async fn toggle(
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
    let wishlist_state = WishlistStore::open(&mut storage, &mut ui).toggle(product.id.clone());
    storage.commit(&session).await?;

    tracing::info!(state = ?wishlist_state, "Wishlist toggled");
    add_breadcrumb("wishlist", "Wishlist toggled");

    Ok(ui.respond(WishlistButtonTemplate {
        product_id: product.id.to_string(),
        wishlisted: wishlist_state.is_wishlisted(),
    }))
}

/// List wishlisted product ids.
#[instrument(skip(session))]
pub async fn index(session: Session) -> Json<Vec<String>> {
    let storage = SessionStorage::load(&session).await;
    let ui = HtmxUi::new();
    let store = WishlistStore::open(storage, ui);

    Json(store.ids().iter().map(ToString::to_string).collect())
}
