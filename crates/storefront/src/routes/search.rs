//! Search prompt handler.
//!
//! There is no product index behind this; the answer to the search prompt is
//! acknowledged with a toast.

use axum::http::HeaderMap;
use axum::response::Response;
use tracing::instrument;

use lavs_boutique_core::{Notification, Notifier};

use crate::ui::HtmxUi;

/// Header carrying the user's answer to `hx-prompt`.
pub const HX_PROMPT: &str = "HX-Prompt";

/// Acknowledge a search (HTMX).
///
/// An empty answer produces no toast.
#[instrument(skip(headers))]
pub async fn search(headers: HeaderMap) -> Response {
    let mut ui = HtmxUi::new();

    let query = headers
        .get(HX_PROMPT)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
        .filter(|query| !query.is_empty());

    if let Some(query) = query {
        tracing::info!(query = %query, "Search requested");
        ui.notify(Notification::success(format!("Searching for \"{query}\"...")));
    }

    ui.respond(())
}
