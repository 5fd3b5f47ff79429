//! Integration test harness for Lavs Boutique.
//!
//! [`TestClient`] drives the storefront router in-process with
//! `tower::ServiceExt::oneshot`, carrying the session cookie between requests
//! the way a browser would.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p lavs-boutique-integration-tests
//! ```

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use lavs_boutique_storefront::catalog::Catalog;
use lavs_boutique_storefront::config::StorefrontConfig;
use lavs_boutique_storefront::state::AppState;
use lavs_boutique_storefront::ui::HX_TRIGGER;

/// The storefront's bundled catalog.
pub const CATALOG_JSON: &str = include_str!("../../storefront/content/products.json");

/// Build a router backed by the bundled catalog and a fresh session store.
///
/// # Panics
///
/// Panics if the bundled catalog is invalid.
#[must_use]
pub fn test_app() -> Router {
    let catalog = Catalog::from_json(CATALOG_JSON).expect("bundled catalog should parse");
    lavs_boutique_storefront::app(AppState::new(StorefrontConfig::default(), catalog))
}

/// A single visitor: one session cookie, many requests.
pub struct TestClient {
    router: Router,
    cookie: Option<String>,
}

/// A fully buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Parsed `HX-Trigger` header, if present.
    ///
    /// # Panics
    ///
    /// Panics if the header is not valid JSON.
    #[must_use]
    pub fn triggers(&self) -> Option<Value> {
        self.headers.get(HX_TRIGGER).map(|value| {
            let text = value.to_str().expect("HX-Trigger should be ASCII");
            serde_json::from_str(text).expect("HX-Trigger should be JSON")
        })
    }

    /// The toast payload from `HX-Trigger`, if any.
    #[must_use]
    pub fn toast(&self) -> Option<Value> {
        self.triggers()
            .and_then(|triggers| triggers.get("show-toast").cloned())
    }

    /// The badge count from `HX-Trigger`, if any.
    #[must_use]
    pub fn badge(&self) -> Option<u64> {
        self.triggers()
            .and_then(|triggers| triggers.get("cart-updated")?.get("count")?.as_u64())
    }
}

impl TestClient {
    /// A new visitor against a fresh app.
    #[must_use]
    pub fn new() -> Self {
        Self::with_router(test_app())
    }

    /// A new visitor against an existing app (shares its session store).
    #[must_use]
    pub const fn with_router(router: Router) -> Self {
        Self {
            router,
            cookie: None,
        }
    }

    /// Send a GET request.
    pub async fn get(&mut self, path: &str) -> TestResponse {
        self.send(Method::GET, path, None, &[]).await
    }

    /// Send a url-encoded form POST.
    pub async fn post_form(&mut self, path: &str, form: &str) -> TestResponse {
        self.send(Method::POST, path, Some(form.to_owned()), &[]).await
    }

    /// Send an empty POST carrying one extra header, e.g. `HX-Prompt`.
    pub async fn post_with_header(&mut self, path: &str, name: &str, value: &str) -> TestResponse {
        self.send(Method::POST, path, None, &[(name, value)]).await
    }

    async fn send(
        &mut self,
        method: Method,
        path: &str,
        form: Option<String>,
        extra_headers: &[(&str, &str)],
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        for (name, value) in extra_headers {
            builder = builder.header(*name, *value);
        }
        let body = match form {
            Some(form) => {
                builder = builder.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
                Body::from(form)
            }
            None => Body::empty(),
        };
        let request = builder.body(body).expect("request should build");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let pair = set_cookie
                .to_str()
                .expect("cookie should be ASCII")
                .split(';')
                .next()
                .unwrap_or_default()
                .to_owned();
            self.cookie = Some(pair);
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should buffer");

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}
