//! Contact form route handlers.
//!
//! Submissions are logged and acknowledged; no message is sent anywhere.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, response::IntoResponse};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use lavs_boutique_core::{CartStore, Email};

use crate::filters;
use crate::storage::SessionStorage;
use crate::ui::HtmxUi;

/// Contact form data.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    /// Checkbox: present only when ticked.
    #[serde(default)]
    pub newsletter: Option<String>,
}

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "contact/show.html")]
pub struct ContactTemplate {
    pub cart_count: u32,
}

/// Form result fragment (replaces the message area via HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "contact/form_message.html")]
pub struct FormMessageTemplate {
    pub message: String,
    pub success: bool,
}

/// Display the contact page.
#[instrument(skip(session))]
pub async fn show(session: Session) -> impl IntoResponse {
    let storage = SessionStorage::load(&session).await;
    let cart_count = CartStore::open(storage, HtmxUi::new()).count();

    ContactTemplate { cart_count }
}

/// Accept a contact form submission (HTMX).
///
/// Every submission is acknowledged. An address that does not parse is only
/// noted in the log.
#[instrument(skip(form), fields(subject = %form.subject))]
pub async fn submit(Form(form): Form<ContactForm>) -> impl IntoResponse {
    if let Err(e) = Email::parse(&form.email) {
        tracing::debug!(error = %e, "Contact form email does not parse");
    }

    tracing::info!(
        email = %form.email.trim(),
        first_name = %form.first_name.trim(),
        last_name = %form.last_name.trim(),
        phone = form.phone.as_deref().unwrap_or("").trim(),
        newsletter = form.newsletter.is_some(),
        message_len = form.message.trim().len(),
        "Contact form submitted"
    );

    FormMessageTemplate {
        message: "Thank you for your message! We'll get back to you within 24 hours."
            .to_string(),
        success: true,
    }
}
