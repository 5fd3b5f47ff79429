//! Newsletter subscription route handler.
//!
//! Subscriptions are acknowledged and logged; nothing is sent to a mailing
//! provider.

use axum::{Form, response::Response};
use serde::Deserialize;
use tracing::instrument;

use lavs_boutique_core::{Email, Notification, Notifier};

use crate::ui::HtmxUi;

/// Newsletter subscription form data.
#[derive(Debug, Deserialize)]
pub struct SubscribeForm {
    pub email: String,
}

/// Subscribe to the newsletter (HTMX).
///
/// Responds with an empty body; the confirmation toast echoes the address as
/// typed.
#[instrument(skip(form))]
pub async fn subscribe(Form(form): Form<SubscribeForm>) -> Response {
    match Email::parse(&form.email) {
        Ok(email) => tracing::info!(email = %email, "Newsletter subscription received"),
        Err(e) => tracing::debug!(error = %e, "Newsletter email does not parse"),
    }

    let mut ui = HtmxUi::new();
    ui.notify(Notification::success(format!(
        "Successfully subscribed with {}!",
        form.email
    )));
    ui.respond(())
}
