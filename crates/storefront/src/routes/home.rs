//! Home page: the product grid.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use axum::response::Response;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use lavs_boutique_core::{CartStore, Notification, NotificationSlot, Notifier, WishlistStore};

use crate::catalog::Product;
use crate::filters;
use crate::state::AppState;
use crate::storage::SessionStorage;
use crate::ui::HtmxUi;

/// Product card display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCardView {
    pub id: String,
    pub name: String,
    pub price: String,
    pub category: String,
    /// Empty when the product has none.
    pub description: String,
    pub wishlisted: bool,
}

impl ProductCardView {
    fn new(product: &Product, wishlisted: bool) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            price: product.price.to_string(),
            category: product.category.clone(),
            description: product.description.clone().unwrap_or_default(),
            wishlisted,
        }
    }
}

/// Category filter link display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryView {
    pub name: String,
    pub active: bool,
}

/// Optional category filter.
#[derive(Debug, Default, Deserialize)]
pub struct HomeQuery {
    pub category: Option<String>,
    /// Drop any filter and confirm with a toast.
    #[serde(default)]
    pub clear: bool,
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub products: Vec<ProductCardView>,
    pub categories: Vec<CategoryView>,
    /// No category filter applied.
    pub showing_all: bool,
    pub cart_count: u32,
}

/// Display the product grid with wishlist marks and the cart badge.
#[instrument(skip(state, session))]
pub async fn home(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<HomeQuery>,
) -> Response {
    let mut storage = SessionStorage::load(&session).await;
    let cart_count = CartStore::open(&mut storage, HtmxUi::new()).count();
    let wishlist = WishlistStore::open(&mut storage, NotificationSlot::new());

    let mut ui = HtmxUi::new();
    let active_category = if query.clear {
        ui.notify(Notification::success("Filters cleared"));
        None
    } else {
        query.category.filter(|c| !c.is_empty())
    };

    let catalog = state.catalog();

    let products = catalog
        .products()
        .iter()
        .filter(|product| {
            active_category
                .as_deref()
                .is_none_or(|category| product.category.eq_ignore_ascii_case(category))
        })
        .map(|product| ProductCardView::new(product, wishlist.contains(&product.id)))
        .collect();

    let mut names: Vec<&str> = catalog
        .products()
        .iter()
        .map(|product| product.category.as_str())
        .collect();
    names.sort_unstable();
    names.dedup();

    let categories = names
        .into_iter()
        .map(|name| CategoryView {
            name: name.to_string(),
            active: active_category
                .as_deref()
                .is_some_and(|active| name.eq_ignore_ascii_case(active)),
        })
        .collect();

    ui.respond(HomeTemplate {
        products,
        categories,
        showing_all: active_category.is_none(),
        cart_count,
    })
}
