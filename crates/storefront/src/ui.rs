//! HTMX rendering surface for the stores.
//!
//! [`HtmxUi`] records what the stores asked to render during one request and
//! turns it into a response: the swapped fragment as the body, badge counts
//! and toasts as `HX-Trigger` events for `static/js/app.js`.

use std::fmt::Write;

use axum::http::HeaderValue;
use axum::response::{IntoResponse, Response};
use serde_json::{Map, Value, json};

use lavs_boutique_core::{
    Cart, CartSummary, DISMISS_AFTER, Notification, NotificationSlot, Notifier, Renderer,
};

use crate::routes::cart::CartView;

/// Header HTMX reads client-side events from.
pub const HX_TRIGGER: &str = "HX-Trigger";

/// Event fired with the new item count whenever badges change.
pub const CART_UPDATED_EVENT: &str = "cart-updated";

/// Event fired with a toast payload.
pub const SHOW_TOAST_EVENT: &str = "show-toast";

/// Collects render requests and the toast for a single response.
#[derive(Debug, Default)]
pub struct HtmxUi {
    cart: Option<CartView>,
    badge: Option<u32>,
    toast: NotificationSlot,
}

impl HtmxUi {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The cart view rendered during this request, if any.
    pub const fn take_cart(&mut self) -> Option<CartView> {
        self.cart.take()
    }

    /// The `HX-Trigger` payload, or `None` when there is nothing to signal.
    #[must_use]
    pub fn triggers(&self) -> Option<Value> {
        let mut events = Map::new();

        if let Some(count) = self.badge {
            events.insert(CART_UPDATED_EVENT.to_string(), json!({ "count": count }));
        }

        if let Some(toast) = self.toast.current() {
            events.insert(
                SHOW_TOAST_EVENT.to_string(),
                json!({
                    "message": toast.message,
                    "kind": toast.kind,
                    "dismissAfterMs": DISMISS_AFTER.as_millis(),
                }),
            );
        }

        (!events.is_empty()).then_some(Value::Object(events))
    }

    /// Attach the collected events to `body`.
    pub fn respond(self, body: impl IntoResponse) -> Response {
        let triggers = self.triggers();
        let mut response = body.into_response();

        if let Some(triggers) = triggers {
            match HeaderValue::from_str(&ascii_json(&triggers)) {
                Ok(value) => {
                    response.headers_mut().insert(HX_TRIGGER, value);
                }
                Err(e) => tracing::warn!(error = %e, "Dropping unencodable HX-Trigger payload"),
            }
        }

        response
    }
}

/// Serialize `value` with every non-ASCII character written as a `\uXXXX`
/// escape, since header values must be visible ASCII.
fn ascii_json(value: &Value) -> String {
    let json = value.to_string();
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        if c.is_ascii() {
            out.push(c);
        } else {
            let mut units = [0_u16; 2];
            for unit in c.encode_utf16(&mut units) {
                let _ = write!(out, "\\u{unit:04x}");
            }
        }
    }
    out
}

impl Renderer for HtmxUi {
    fn render_cart(&mut self, cart: &Cart, summary: &CartSummary) {
        self.cart = Some(CartView::new(cart, summary));
    }

    fn render_badges(&mut self, count: u32) {
        self.badge = Some(count);
    }
}

impl Notifier for HtmxUi {
    fn notify(&mut self, notification: Notification) {
        self.toast.show(notification);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use lavs_boutique_core::{Price, ProductId};

    use super::*;

    #[test]
    fn test_no_events_no_header() {
        let ui = HtmxUi::new();
        assert!(ui.triggers().is_none());

        let response = ui.respond("body");
        assert!(response.headers().get(HX_TRIGGER).is_none());
    }

    #[test]
    fn test_badge_and_toast_events() {
        let mut ui = HtmxUi::new();
        ui.render_badges(3);
        ui.notify(Notification::success("first"));
        ui.notify(Notification::error("second"));

        let triggers = ui.triggers().unwrap();
        assert_eq!(triggers[CART_UPDATED_EVENT]["count"], 3);
        assert_eq!(triggers[SHOW_TOAST_EVENT]["message"], "second");
        assert_eq!(triggers[SHOW_TOAST_EVENT]["kind"], "error");
        assert_eq!(triggers[SHOW_TOAST_EVENT]["dismissAfterMs"], 3000);
    }

    #[test]
    fn test_respond_sets_header() {
        let mut ui = HtmxUi::new();
        ui.render_badges(1);
        let response = ui.respond("ok");

        let header = response.headers().get(HX_TRIGGER).unwrap().to_str().unwrap();
        let parsed: Value = serde_json::from_str(header).unwrap();
        assert_eq!(parsed, json!({ "cart-updated": { "count": 1 } }));
    }

    #[test]
    fn test_non_ascii_toast_survives_header_encoding() {
        let mut ui = HtmxUi::new();
        ui.notify(Notification::success("Successfully subscribed with zoë@example.com!"));
        let response = ui.respond(());

        let header = response.headers().get(HX_TRIGGER).unwrap().to_str().unwrap();
        assert!(header.is_ascii());
        assert!(header.contains("zo\\u00eb"));
        let parsed: Value = serde_json::from_str(header).unwrap();
        assert_eq!(
            parsed[SHOW_TOAST_EVENT]["message"],
            "Successfully subscribed with zoë@example.com!"
        );
    }

    #[test]
    fn test_astral_characters_use_surrogate_pairs() {
        let encoded = ascii_json(&json!("👜"));
        assert_eq!(encoded, "\"\\ud83d\\udc5c\"");
        let decoded: String = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, "👜");
    }

    #[test]
    fn test_render_cart_builds_view() {
        let mut cart = Cart::new();
        cart.add(ProductId::new("1"), "Scarf".into(), Price::from_cents(4500));
        let mut ui = HtmxUi::new();
        ui.render_cart(&cart, &cart.summary());

        let view = ui.take_cart().unwrap();
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.total, "$58.60");
        assert!(ui.take_cart().is_none());
    }
}
